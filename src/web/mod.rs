//! Browser bindings: DOM-backed host and history, and the `start` entry
//! point exported to JavaScript.

mod app;
mod history;
mod host;

pub use app::start;
pub use history::BrowserHistory;
pub use host::BrowserHost;
