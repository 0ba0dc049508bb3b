// core/src/model/mod.rs

//! Plain data records shared by the stores, the views and the HTTP layer.

pub mod crop;
pub mod listing;
pub mod order;
pub mod profile;
pub mod ticket;
pub mod user;

pub use crop::{CropRecord, Demand, SoilHealth};
pub use listing::{Listing, ListingPatch};
pub use order::{CartLine, Order, PurchaseBatch, PurchaseReceipt};
pub use profile::Profile;
pub use ticket::{Alert, Ticket, TicketStatus};
pub use user::{User, UserStatus};

pub type ProductId = u64;
pub type UserId = u64;
pub type TicketId = u64;
