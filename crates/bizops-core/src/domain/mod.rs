//! Domain Layer
//!
//! Records exchanged with the remote API. The server owns every record;
//! the client only reads them, edits copies and sends them back.

mod entity;
mod employee_log;
mod inventory;
mod item;
mod page;
mod purchase_order;
mod supplier;

pub use entity::{remove_by_id, upsert_by_id, Entity};
pub use employee_log::{EmployeeLog, EmployeeLogUpdate, NewEmployeeLog};
pub use inventory::{InventoryItem, StockInput};
pub use item::{Item, NewItem, Phase, PhaseAction, PhaseStatus, Priority, Subphase, SubphaseUpdate};
pub use page::Page;
pub use purchase_order::{NewPurchaseOrder, PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
pub use supplier::{Supplier, SupplierInput};
