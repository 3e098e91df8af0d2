//! Command-line interface definitions and handlers
//!
//! This module defines the CLI structure using clap's derive API with the
//! parameter wrapper pattern: each command has a clap argument struct that
//! converts into the corresponding framework-free core parameter type, so
//! CLI concerns (flags, aliases, help text) never leak into the engine.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use relay_core::{
    display::{
        AnalysisReport, CircuitSummaries, CreateResult, DeletionReport, OperationStatus, Steps,
        ValidationNotice,
    },
    params::{
        CircuitIds, CreateCircuit, DeleteCircuits, DeleteOptions, Id, ListCircuits, StepCreate,
        TransitionCreate,
    },
    Relay, RelayError,
};

use crate::renderer::TerminalRenderer;

/// CLI handler that owns the engine and the terminal renderer.
pub struct Cli {
    relay: Relay,
    renderer: TerminalRenderer,
}

// ============================================================================
// Circuit commands
// ============================================================================

/// Create a new circuit
#[derive(Args)]
pub struct CreateCircuitArgs {
    /// Unique human-readable key of the circuit (e.g. INVOICE-VALIDATION)
    pub key: String,
    /// Title of the circuit
    pub title: String,
    /// Optional description providing more context about the circuit
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateCircuitArgs> for CreateCircuit {
    fn from(val: CreateCircuitArgs) -> Self {
        CreateCircuit {
            key: val.key,
            title: val.title,
            description: val.description,
        }
    }
}

/// List circuits
#[derive(Args)]
pub struct ListCircuitsArgs {
    /// Include deactivated circuits in the listing
    #[arg(long)]
    pub all: bool,
}

impl From<ListCircuitsArgs> for ListCircuits {
    fn from(val: ListCircuitsArgs) -> Self {
        ListCircuits {
            include_inactive: val.all,
        }
    }
}

/// Show details of a specific circuit
#[derive(Args)]
pub struct ShowCircuitArgs {
    /// Unique identifier of the circuit to show details for
    pub id: u64,
}

impl From<ShowCircuitArgs> for Id {
    fn from(val: ShowCircuitArgs) -> Self {
        Id { id: val.id }
    }
}

/// Analyze which dependent data would block deleting circuits
#[derive(Args)]
pub struct AnalyzeCircuitsArgs {
    /// Identifiers of the circuits to analyze
    #[arg(required = true)]
    pub ids: Vec<u64>,
}

impl From<AnalyzeCircuitsArgs> for CircuitIds {
    fn from(val: AnalyzeCircuitsArgs) -> Self {
        CircuitIds { ids: val.ids }
    }
}

/// Delete circuits permanently
///
/// Deletion is denied when blocking dependencies (pending approvals) exist
/// unless --force is given. With --cascade, dependent records are removed in
/// safe order first; without it the delete is attempted as-is and fails
/// naturally while dependents exist. --backup writes a best-effort snapshot
/// before anything is removed.
#[derive(Args)]
pub struct DeleteCircuitsArgs {
    /// Identifiers of the circuits to delete
    #[arg(required = true)]
    pub ids: Vec<u64>,
    /// Proceed even when blocking dependencies exist
    #[arg(long)]
    pub force: bool,
    /// Remove dependent records before each circuit
    #[arg(long)]
    pub cascade: bool,
    /// Write a backup snapshot before deleting
    #[arg(long)]
    pub backup: bool,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<&DeleteCircuitsArgs> for DeleteCircuits {
    fn from(val: &DeleteCircuitsArgs) -> Self {
        DeleteCircuits {
            ids: val.ids.clone(),
            options: DeleteOptions {
                force_delete: val.force,
                cascade_delete: val.cascade,
                backup_before_delete: val.backup,
            },
        }
    }
}

#[derive(Subcommand)]
pub enum CircuitCommands {
    /// Create a new circuit
    #[command(alias = "c")]
    Create(CreateCircuitArgs),
    /// List circuits
    #[command(aliases = ["l", "ls"])]
    List(ListCircuitsArgs),
    /// Show details of a specific circuit
    #[command(alias = "s")]
    Show(ShowCircuitArgs),
    /// Deactivate a circuit (refused while documents are in progress)
    #[command(alias = "off")]
    Deactivate(ShowCircuitArgs),
    /// Reactivate a previously deactivated circuit
    #[command(alias = "on")]
    Activate(ShowCircuitArgs),
    /// Analyze dependencies that would block deletion
    #[command(alias = "a")]
    Analyze(AnalyzeCircuitsArgs),
    /// Pre-flight check whether circuits could be deleted
    #[command(alias = "v")]
    Validate(AnalyzeCircuitsArgs),
    /// Delete circuits permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteCircuitsArgs),
}

// ============================================================================
// Step commands
// ============================================================================

/// Add a new step to a circuit
#[derive(Args)]
pub struct AddStepArgs {
    /// Unique identifier of the circuit to add this step to
    pub circuit_id: u64,
    /// Key of the step, unique within the circuit
    pub key: String,
    /// Name of the role responsible for this step
    #[arg(short, long)]
    pub role: Option<String>,
    /// Mark documents reaching this step as finished
    #[arg(long = "final")]
    pub is_final: bool,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            circuit_id: val.circuit_id,
            key: val.key,
            role: val.role,
            is_final: val.is_final,
        }
    }
}

/// List the steps of a circuit
#[derive(Args)]
pub struct ListStepsArgs {
    /// Unique identifier of the circuit whose steps to list
    pub circuit_id: u64,
}

impl From<ListStepsArgs> for Id {
    fn from(val: ListStepsArgs) -> Self {
        Id { id: val.circuit_id }
    }
}

/// Remove a step from its circuit
#[derive(Args)]
pub struct RemoveStepArgs {
    /// Unique identifier of the step to remove
    pub id: u64,
}

impl From<RemoveStepArgs> for Id {
    fn from(val: RemoveStepArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Add a new step to a circuit
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// List the steps of a circuit
    #[command(aliases = ["l", "ls"])]
    List(ListStepsArgs),
    /// Remove a step from its circuit
    #[command(aliases = ["d", "rm"])]
    Remove(RemoveStepArgs),
}

// ============================================================================
// Transition commands
// ============================================================================

/// Define a transition between two statuses of a circuit
#[derive(Args)]
pub struct AddTransitionArgs {
    /// Unique identifier of the circuit the transition belongs to
    pub circuit_id: u64,
    /// Status a document leaves when taking this edge
    pub from_status: String,
    /// Status a document arrives at when taking this edge
    pub to_status: String,
}

impl From<AddTransitionArgs> for TransitionCreate {
    fn from(val: AddTransitionArgs) -> Self {
        TransitionCreate {
            circuit_id: val.circuit_id,
            from_status: val.from_status,
            to_status: val.to_status,
        }
    }
}

/// List the transitions of a circuit
#[derive(Args)]
pub struct ListTransitionsArgs {
    /// Unique identifier of the circuit whose transitions to list
    pub circuit_id: u64,
}

impl From<ListTransitionsArgs> for Id {
    fn from(val: ListTransitionsArgs) -> Self {
        Id { id: val.circuit_id }
    }
}

#[derive(Subcommand)]
pub enum TransitionCommands {
    /// Define a transition between two statuses
    #[command(alias = "a")]
    Add(AddTransitionArgs),
    /// List the transitions of a circuit
    #[command(aliases = ["l", "ls"])]
    List(ListTransitionsArgs),
}

// ============================================================================
// Handlers
// ============================================================================

impl Cli {
    /// Create a new CLI handler.
    pub fn new(relay: Relay, renderer: TerminalRenderer) -> Self {
        Self { relay, renderer }
    }

    /// Dispatch a circuit command.
    pub async fn handle_circuit_command(self, command: CircuitCommands) -> Result<()> {
        match command {
            CircuitCommands::Create(args) => {
                let circuit = self.relay.create_circuit(&args.into()).await?;
                self.renderer.render(&CreateResult::new(circuit).to_string())
            }
            CircuitCommands::List(args) => self.list_circuits(&args.into()).await,
            CircuitCommands::Show(args) => {
                let params: Id = args.into();
                match self.relay.get_circuit(&params).await? {
                    Some(circuit) => self.renderer.render(&circuit.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Circuit with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            CircuitCommands::Deactivate(args) => {
                let params: Id = args.into();
                match self.relay.deactivate_circuit(&params).await {
                    Ok(Some(circuit)) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Deactivated circuit '{}' (ID: {})",
                            circuit.title, circuit.id
                        ))
                        .to_string(),
                    ),
                    Ok(None) => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Circuit with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                    Err(e @ RelayError::DeactivationBlocked { .. }) => self
                        .renderer
                        .render(&OperationStatus::failure(e.to_string()).to_string()),
                    Err(e) => Err(e.into()),
                }
            }
            CircuitCommands::Activate(args) => {
                let params: Id = args.into();
                match self.relay.activate_circuit(&params).await? {
                    Some(circuit) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Activated circuit '{}' (ID: {})",
                            circuit.title, circuit.id
                        ))
                        .to_string(),
                    ),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Circuit with ID {} not found",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            CircuitCommands::Analyze(args) => {
                let analysis = self.relay.analyze_dependencies(&args.into()).await?;
                self.renderer.render(&AnalysisReport(analysis).to_string())
            }
            CircuitCommands::Validate(args) => {
                let check = self.relay.validate_deletion(&args.into()).await?;
                self.renderer.render(&ValidationNotice(check).to_string())
            }
            CircuitCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Circuit deletion requires explicit confirmation. \
                         Pass --confirm to proceed with permanent deletion."
                    );
                }
                let result = self.relay.delete_circuits(&(&args).into()).await?;
                self.renderer.render(&DeletionReport(result).to_string())
            }
        }
    }

    /// Dispatch a step command.
    pub async fn handle_step_command(self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let step = self.relay.add_step(&args.into()).await?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            StepCommands::List(args) => {
                let steps = self.relay.get_steps(&args.into()).await?;
                self.renderer.render(&Steps(steps).to_string())
            }
            StepCommands::Remove(args) => {
                let params: Id = args.into();
                self.relay.remove_step(&params).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Removed step with ID: {}", params.id))
                        .to_string(),
                )
            }
        }
    }

    /// Dispatch a transition command.
    pub async fn handle_transition_command(self, command: TransitionCommands) -> Result<()> {
        match command {
            TransitionCommands::Add(args) => {
                let transition = self.relay.define_transition(&args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(transition).to_string())
            }
            TransitionCommands::List(args) => {
                let transitions = self.relay.list_transitions(&args.into()).await?;
                if transitions.is_empty() {
                    self.renderer.render("No transitions found.\n")
                } else {
                    let listing: String =
                        transitions.iter().map(ToString::to_string).collect();
                    self.renderer.render(&listing)
                }
            }
        }
    }

    /// List circuits with dependency counts.
    pub async fn list_circuits(&self, params: &ListCircuits) -> Result<()> {
        let summaries = self.relay.list_circuits(params).await?;
        self.renderer
            .render(&CircuitSummaries(summaries).to_string())
    }
}
