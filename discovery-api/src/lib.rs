pub mod model;
pub mod traits;

pub use model::descriptor::{ServiceDescriptor, ServiceDescriptorBuilder};
pub use model::error::DiscoveryError;
pub use model::events::{RefreshFailure, RefreshSuccess};
pub use model::state::ServiceState;
pub use traits::client::DiscoveryClient;
pub use traits::observer::RefreshObserver;
pub use traits::scheduler::{ScheduledTask, Scheduler, Task};
pub use traits::selector::ServiceSelector;

pub mod prelude {
    pub use crate::model::descriptor::ServiceDescriptor;
    pub use crate::model::error::DiscoveryError;
    pub use crate::model::state::ServiceState;
    pub use crate::traits::client::DiscoveryClient;
    pub use crate::traits::selector::ServiceSelector;
}
