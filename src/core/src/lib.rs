mod config;
mod events;
mod gateway;
mod history;
mod manager;
pub mod paths;
mod registry;
mod router;
mod storage;
mod types;

pub use config::{BadgeReset, ManagerConfig};
pub use events::{DomainEvent, EventBus};
pub use gateway::{
    ActionResponse, CategorySpec, DeliveryGateway, DeliveryRequest, Presentation, ReceivedPush,
    SendOptions, Transport, TransportEvent, TransportFuture,
};
pub use history::{HistoryFilter, NotificationStore};
pub use manager::{LifecycleManager, ManagerError};
pub use registry::{TypeConfig, TypeConfigRegistry};
pub use router::ActionRouter;
pub use storage::{SqliteStore, Store};
pub use types::{
    ActionDescriptor, ActionKind, NotificationKind, NotificationRecord, Priority,
};
