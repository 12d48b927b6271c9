//! Provisioning saga: step model, run state, result and compensation

mod compensator;
mod result;
mod state;
mod step;
mod workflow;

pub use compensator::{
    CompensationAction, CompensationEntry, CompensationOutcome, CompensationReport, Compensator,
};
pub use result::{StepFlags, WorkflowDetails, WorkflowResult, WorkflowResultBuilder};
pub use state::{WorkflowRequest, WorkflowState};
pub use step::{SagaStage, WorkflowStep};
pub use workflow::ProvisioningSaga;
