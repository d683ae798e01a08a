pub mod led;
pub mod pins;
pub mod usart;

pub use led::{Led, LedBar};
pub use pins::BoardPins;
pub use usart::{Usart, UsartRx};
