pub mod category;
pub mod common;
pub mod period;
pub mod transaction;

pub use category::Category;
pub use common::{Amounted, BelongsToCategory, Direction, Displayable, Identifiable, NamedEntity};
pub use period::{DateWindow, PeriodError, PeriodKey};
pub use transaction::Transaction;
