//! Entity definitions for the warehouse backend
//!
//! This crate contains Sea-ORM entity definitions for the database models.
//! Entities mirror the schema created by the `migration` crate.

pub mod branches;
pub use branches::Entity as Branches;
pub mod checkers;
pub use checkers::Entity as Checkers;
pub mod companies;
pub use companies::Entity as Companies;
pub mod inventories;
pub use inventories::Entity as Inventories;
pub mod inventory_details;
pub use inventory_details::Entity as InventoryDetails;
pub mod items;
pub use items::Entity as Items;
pub mod operating_groups;
pub use operating_groups::Entity as OperatingGroups;
pub mod operatings;
pub use operatings::Entity as Operatings;
pub mod states;
pub use states::Entity as States;
pub mod users;
pub use users::Entity as Users;
pub mod verifications;
pub use verifications::Entity as Verifications;
pub mod zones;
pub use zones::Entity as Zones;
