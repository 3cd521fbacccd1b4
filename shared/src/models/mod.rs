//! Entity models and request/response payloads
//!
//! One file per entity family. Every persisted entity carries the audit
//! column set: `id`, `created_at`, `updated_at`, `deleted_at`, `is_deleted`.
//! Soft-deleted rows stay addressable by id but are excluded from default
//! queries.

// System domain
pub mod company;
pub mod dept;
pub mod dict;
pub mod menu;
pub mod role;
pub mod setting;
pub mod user;

// Product domain
pub mod combo;
pub mod dish;
pub mod group;
pub mod kitchen;
pub mod tag;

// Record domain
pub mod record;
pub mod upload;

pub use company::{Branch, BranchCreate, BranchUpdate, Company, CompanyCreate, CompanyUpdate};
pub use combo::{
    Combo, ComboCreate, ComboItem, ComboItemCreate, ComboItemUpdate, ComboOut, ComboSeries,
    ComboSeriesCreate, ComboSeriesUpdate, ComboUpdate,
};
pub use dept::{Dept, DeptCreate, DeptUpdate};
pub use dict::{
    DictDetail, DictDetailCreate, DictDetailUpdate, DictType, DictTypeCreate, DictTypeUpdate,
};
pub use dish::{
    Dish, DishBom, DishBomCreate, DishBomUpdate, DishBranch, DishBranchCreate, DishBranchOut,
    DishBranchUpdate, DishCreate, DishImage, DishImageCreate, DishImageUpdate, DishOut,
    DishUpdate,
};
pub use group::{
    DishGroup, DishGroupCreate, DishGroupItem, DishGroupItemCreate, DishGroupItemUpdate,
    DishGroupUpdate, GroupType, GroupTypeCreate, GroupTypeUpdate,
};
pub use kitchen::{
    Kitchen, KitchenBranch, KitchenBranchCreate, KitchenBranchUpdate, KitchenCreate,
    KitchenUpdate,
};
pub use menu::{Menu, MenuCreate, MenuUpdate};
pub use record::{OperationRecord, SmsRecord};
pub use role::{Role, RoleCreate, RoleOut, RoleUpdate};
pub use setting::{SettingEntry, SettingTab};
pub use tag::{Tag, TagCreate, Tagging, TaggingCreate, TaggingUpdate, TagUpdate};
pub use upload::UploadFile;
pub use user::{User, UserCreate, UserOut, UserUpdate};
