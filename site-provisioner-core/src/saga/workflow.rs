//! Provisioning Saga
//!
//! Seven steps against four independent APIs:
//!
//! | # | Step                 | On failure                                   |
//! |---|----------------------|----------------------------------------------|
//! | 1 | availability check   | stop, nothing to undo                        |
//! | 2 | domain purchase      | stop, nothing to undo                        |
//! | 3 | zone creation        | compensate, stop                             |
//! | 4 | nameserver delegation| transient errors retried; compensate, stop   |
//! | 5 | DNS records          | record per-record errors, continue           |
//! | 6 | hosting domain       | compensate, stop                             |
//! | 7 | hosting verification | polled; report, keep everything              |
//!
//! Expected failures end in an `Ok(WorkflowResult)` with `success == false`. Anything else
//! that interrupts a run is a fault: the compensator runs first, then the fault is returned as
//! [`CoreError::WorkflowAborted`].

use std::ops::ControlFlow;
use std::sync::Arc;

use site_provisioner_provider::{DnsProvider, HostingPlatform, ProviderError, Registrar};

use crate::config::WorkflowSettings;
use crate::error::{CoreError, CoreResult};
use crate::poll::{poll_until, PollStatus};
use crate::retry::{retry_with_backoff_when, RetryError};
use crate::services::ServiceContext;
use crate::utils::domain::validate_domain;

use super::compensator::Compensator;
use super::result::{WorkflowResult, WorkflowResultBuilder};
use super::state::{WorkflowRequest, WorkflowState};
use super::step::{SagaStage, WorkflowStep};

/// Longest registration period accepted by the registrar.
const MAX_YEARS: u32 = 10;

type Flow = CoreResult<ControlFlow<()>>;

/// Mutable bookkeeping of one run.
struct Run {
    state: WorkflowState,
    result: WorkflowResultBuilder,
    stage: SagaStage,
}

impl Run {
    fn advance(&mut self, step: WorkflowStep) -> CoreResult<()> {
        let next = self.stage.advance(step)?;
        log::info!("[{}] {:?} -> {:?}", self.state.domain, self.stage, next);
        self.stage = next;
        Ok(())
    }

    fn stop(&mut self) -> ControlFlow<()> {
        self.enter_failed();
        ControlFlow::Break(())
    }

    fn enter_failed(&mut self) {
        log::info!("[{}] {:?} -> {:?}", self.state.domain, self.stage, SagaStage::Failed);
        self.stage = SagaStage::Failed;
    }

    /// A run that stopped short of verification without an explicit stop ends in `Failed`.
    fn settle(&mut self) {
        if !self.stage.is_terminal() {
            self.enter_failed();
        }
    }

    fn zone_id(&self) -> CoreResult<String> {
        self.state.zone_id.clone().ok_or_else(|| {
            CoreError::Validation(format!("{:?} reached without a zone id", self.stage))
        })
    }
}

pub struct ProvisioningSaga {
    ctx: Arc<ServiceContext>,
    settings: WorkflowSettings,
    compensator: Compensator,
}

impl ProvisioningSaga {
    pub fn new(ctx: Arc<ServiceContext>, settings: WorkflowSettings) -> Self {
        let compensator = Compensator::new(ctx.dns.clone(), ctx.hosting.clone());
        Self {
            ctx,
            settings,
            compensator,
        }
    }

    fn registrar(&self) -> &dyn Registrar {
        self.ctx.registrar.as_ref()
    }

    fn dns(&self) -> &dyn DnsProvider {
        self.ctx.dns.as_ref()
    }

    fn hosting(&self) -> &dyn HostingPlatform {
        self.ctx.hosting.as_ref()
    }

    /// Runs the whole workflow for one domain.
    ///
    /// Input that fails validation is rejected before any external call.
    pub async fn run(&self, request: WorkflowRequest) -> CoreResult<WorkflowResult> {
        let domain = validate_domain(&request.domain)?;
        if request.years == 0 || request.years > MAX_YEARS {
            return Err(CoreError::Validation(format!(
                "years must be between 1 and {MAX_YEARS}, got {}",
                request.years
            )));
        }

        log::info!(
            "[{domain}] Starting provisioning (years={}, whoisGuard={})",
            request.years,
            request.whois_guard
        );
        let mut run = Run {
            state: WorkflowState::new(domain.clone(), &request),
            result: WorkflowResultBuilder::new(domain.clone()),
            stage: SagaStage::Init,
        };

        if let Err(fault) = self.execute(&mut run).await {
            log::error!("[{domain}] Workflow interrupted at {:?}: {fault}", run.stage);
            let compensation = self.compensator.compensate(&run.state).await;
            return Err(CoreError::WorkflowAborted {
                reason: fault.to_string(),
                compensation,
            });
        }

        run.settle();
        run.result.details_mut().record_ids = run.state.created_record_ids.clone();
        let result = run.result.finish();
        if result.success() {
            log::info!("[{domain}] Provisioning complete");
        } else {
            log::warn!(
                "[{domain}] Provisioning finished with {} error(s), stage {:?}",
                result.errors().len(),
                run.stage
            );
        }
        Ok(result)
    }

    async fn execute(&self, run: &mut Run) -> CoreResult<()> {
        if self.check_availability(run).await?.is_break() {
            return Ok(());
        }
        if self.purchase(run).await?.is_break() {
            return Ok(());
        }
        if self.create_zone(run).await?.is_break() {
            return Ok(());
        }
        if self.delegate_nameservers(run).await?.is_break() {
            return Ok(());
        }
        self.create_records(run).await?;
        if self.add_hosting_domain(run).await?.is_break() {
            return Ok(());
        }
        self.await_verification(run).await
    }

    /// Compensates, attaches the report and stops the run.
    async fn roll_back(&self, run: &mut Run) -> ControlFlow<()> {
        let report = self.compensator.compensate(&run.state).await;
        run.result.compensation(report);
        run.stop()
    }

    // Step 1
    async fn check_availability(&self, run: &mut Run) -> Flow {
        let step = WorkflowStep::AvailabilityCheck;
        let domain = run.state.domain.clone();

        match self.registrar().check_availability(&domain).await {
            Ok(availability) if availability.available => {
                if availability.is_premium {
                    log::warn!(
                        "[{domain}] Premium domain, price {:?}",
                        availability.price
                    );
                }
                run.result.complete(step);
                run.advance(step)?;
                Ok(ControlFlow::Continue(()))
            }
            Ok(_) => {
                run.result
                    .fail(step, format!("Domain {domain} is not available for registration"));
                Ok(run.stop())
            }
            Err(e) => {
                run.result.fail(step, format!("Availability check failed: {e}"));
                Ok(run.stop())
            }
        }
    }

    // Step 2
    async fn purchase(&self, run: &mut Run) -> Flow {
        let step = WorkflowStep::DomainPurchase;
        let domain = run.state.domain.clone();

        match self
            .registrar()
            .purchase(&domain, run.state.years, run.state.whois_guard)
            .await
        {
            Ok(receipt) => {
                run.state.mark_purchased();
                let details = run.result.details_mut();
                details.registrar_transaction_id = receipt.transaction_id;
                details.registrar_domain_id = receipt.domain_id;
                run.result.complete(step);
                run.advance(step)?;
                Ok(ControlFlow::Continue(()))
            }
            Err(e) => {
                run.result.fail(step, format!("Domain purchase failed: {e}"));
                Ok(run.stop())
            }
        }
    }

    // Step 3
    async fn create_zone(&self, run: &mut Run) -> Flow {
        let step = WorkflowStep::ZoneCreated;
        let domain = run.state.domain.clone();

        match self.dns().create_zone(&domain).await {
            Ok(zone) => {
                if zone.already_exists {
                    log::info!("[{domain}] Reusing existing zone {}", zone.zone_id);
                }
                run.state.set_zone(zone.zone_id.clone());
                let details = run.result.details_mut();
                details.zone_id = Some(zone.zone_id);
                details.nameservers = zone.name_servers;
                run.result.complete(step);
                run.advance(step)?;
                Ok(ControlFlow::Continue(()))
            }
            Err(e) => {
                run.result.fail(step, format!("Zone creation failed: {e}"));
                Ok(self.roll_back(run).await)
            }
        }
    }

    // Step 4
    async fn delegate_nameservers(&self, run: &mut Run) -> Flow {
        let step = WorkflowStep::NameserversSet;
        let domain = run.state.domain.clone();
        let nameservers = run.result.details().nameservers.clone();

        let registrar = self.registrar();
        let (name, servers) = (domain.as_str(), nameservers.as_slice());
        let outcome = retry_with_backoff_when(
            &self.settings.nameserver_retry,
            move || registrar.delegate_nameservers(name, servers),
            ProviderError::is_transient,
            |attempt, e, delay| {
                log::warn!(
                    "[{domain}] Nameserver delegation attempt {attempt} failed ({e}), next try in {}ms",
                    delay.as_millis()
                );
            },
        )
        .await;

        match outcome {
            Ok(()) => {
                run.result.complete(step);
                run.advance(step)?;
                Ok(ControlFlow::Continue(()))
            }
            Err(RetryError::InvalidPolicy(reason)) => Err(CoreError::InvalidRetryPolicy(reason)),
            Err(RetryError::Exhausted {
                attempts,
                last_error,
            }) => {
                run.result.fail(
                    step,
                    format!("Nameserver delegation failed after {attempts} attempt(s): {last_error}"),
                );
                Ok(self.roll_back(run).await)
            }
        }
    }

    // Step 5
    async fn create_records(&self, run: &mut Run) -> CoreResult<()> {
        let step = WorkflowStep::DnsRecords;
        let zone_id = run.zone_id()?;
        let target = &self.settings.hosting_target;

        match self.dns().create_records(&zone_id, target).await {
            Ok(batch) => {
                for id in &batch.created_ids {
                    run.state.record_created(id.clone());
                }
                if batch.success() {
                    run.result.complete(step);
                } else {
                    log::warn!(
                        "[{}] {}/{} DNS record(s) failed",
                        run.state.domain,
                        batch.failed_count(),
                        target.len()
                    );
                    for failure in &batch.failures {
                        run.result.fail(step, failure.to_string());
                    }
                }
            }
            Err(e) => run.result.fail(step, format!("DNS record creation failed: {e}")),
        }

        run.advance(step)
    }

    // Step 6
    async fn add_hosting_domain(&self, run: &mut Run) -> Flow {
        let step = WorkflowStep::HostingDomainAdded;
        let domain = run.state.domain.clone();

        let addition = match self.hosting().add_domain(&domain).await {
            Ok(addition) => addition,
            Err(e) => {
                run.result.fail(step, format!("Adding domain to hosting platform failed: {e}"));
                return Ok(self.roll_back(run).await);
            }
        };

        if addition.already_exists {
            // attached before this run; rollback leaves it
            log::info!("[{domain}] Already attached to {}, reusing it", self.hosting().id());
        } else {
            run.state.mark_hosting_added();
        }
        run.result.complete(step);
        run.advance(step)?;

        if addition.verification_required() {
            let zone_id = run.zone_id()?;
            for required in &addition.verification_records {
                let Some(record) = required.to_dns_record(&domain) else {
                    run.result.fail(
                        WorkflowStep::DnsRecords,
                        format!(
                            "{} {}: unsupported verification record type",
                            required.record_type, required.name
                        ),
                    );
                    continue;
                };
                match self.dns().create_record(&zone_id, &record).await {
                    Ok(id) => {
                        log::info!("[{domain}] Published verification record {}", record.label());
                        run.state.record_created(id);
                    }
                    Err(e) => run
                        .result
                        .fail(WorkflowStep::DnsRecords, format!("{}: {e}", record.label())),
                }
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    // Step 7
    async fn await_verification(&self, run: &mut Run) -> CoreResult<()> {
        let step = WorkflowStep::HostingVerified;
        let poll = self.settings.verification_poll;
        let hosting = self.hosting();
        let domain = run.state.domain.clone();
        let name = domain.as_str();

        let outcome = poll_until(
            move || async move { hosting.check_verified(name).await.map(PollStatus::from) },
            poll.max_attempts,
            poll.interval,
        )
        .await;

        if outcome.is_success() {
            run.result.complete(step);
            run.advance(step)?;
        } else {
            log::warn!("[{domain}] Hosting verification {outcome}");
            run.result.fail(
                step,
                format!(
                    "Hosting verification {outcome}; resources were kept, re-check the domain later"
                ),
            );
        }
        Ok(())
    }
}
