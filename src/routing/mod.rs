pub mod decision;
pub mod table;

pub use decision::{decide, Decision};
pub use table::{ForwardingTable, TableBuilder};
