pub mod app;
pub mod input;
pub mod render;
pub mod terminal;

pub use app::App;
pub use input::{InputEvent, InputListener};
pub use render::{DisplayMode, Renderer};
pub use terminal::{AnsiTerminal, NullTerminal, TerminalCapabilities};
