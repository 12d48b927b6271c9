//! Site Provisioner Core Library
//!
//! Drives the provisioning of a website across independent third-party APIs:
//! - Backoff Retrier ([`retry_with_backoff`])
//! - Polling Waiter ([`poll_until`])
//! - Provisioning Saga ([`ProvisioningSaga`]) and its Rollback Compensator ([`Compensator`])
//! - Site bootstrap (repository + hosting project) ([`SiteBootstrapService`])
//!
//! Adapters are injected through [`ServiceContext`] as trait objects, so the saga runs
//! unchanged against the real APIs or against in-memory mocks.

pub mod config;
pub mod error;
pub mod poll;
pub mod retry;
pub mod saga;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{ProvisionerConfig, WorkflowSettings};
pub use error::{CoreError, CoreResult};
pub use poll::{poll_until, PollOutcome, PollSettings, PollStatus};
pub use retry::{retry_with_backoff, retry_with_backoff_when, RetryError, RetryPolicy};
pub use saga::{
    CompensationAction, CompensationEntry, CompensationOutcome, CompensationReport, Compensator,
    ProvisioningSaga, SagaStage, StepFlags, WorkflowDetails, WorkflowRequest, WorkflowResult,
    WorkflowResultBuilder, WorkflowState, WorkflowStep,
};
pub use services::{BootstrapOutcome, DomainService, ServiceContext, SiteBootstrapService};
