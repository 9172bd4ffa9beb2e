mod central_panel;
mod heroes_panel;
mod messages_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use heroes_panel::heroes_panel;
pub use messages_panel::messages_panel;
pub use tools_panel::tools_panel;
