//! Agents command — renders fleet snapshots as tables or JSON.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use gantry_common::{Agent, AgentConfigState};

use crate::domain::{AgentTableKind, Fleet, SortField, SortHandler, TableError, compare};
use crate::output::{OutputContext, json};
use crate::snapshot;

/// Agents subcommands.
#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List agents from a fleet snapshot
    List(ListArgs),
    /// Show agent counts per administrative state
    Count(CountArgs),
}

/// Arguments for `agents list`.
#[derive(Args)]
pub struct ListArgs {
    /// Snapshot document: file path, or '-' for stdin
    #[arg(long, default_value = snapshot::STDIN_SOURCE)]
    pub snapshot: String,

    /// Case-insensitive substring filter across agent fields
    #[arg(long, allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Restrict to one administrative state
    #[arg(long, value_enum)]
    pub state: Option<ConfigStateArg>,

    /// Column to sort by
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Show the elastic agents table instead of the static one
    #[arg(long)]
    pub elastic: bool,
}

/// Arguments for `agents count`.
#[derive(Args)]
pub struct CountArgs {
    /// Snapshot document: file path, or '-' for stdin
    #[arg(long, default_value = snapshot::STDIN_SOURCE)]
    pub snapshot: String,

    /// Case-insensitive substring filter across agent fields
    #[arg(long, allow_hyphen_values = true)]
    pub filter: Option<String>,
}

/// Administrative state filter values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigStateArg {
    Pending,
    Enabled,
    Disabled,
}

impl From<ConfigStateArg> for AgentConfigState {
    fn from(arg: ConfigStateArg) -> Self {
        match arg {
            ConfigStateArg::Pending => Self::Pending,
            ConfigStateArg::Enabled => Self::Enabled,
            ConfigStateArg::Disabled => Self::Disabled,
        }
    }
}

/// Sortable column names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Hostname,
    Sandbox,
    Os,
    Ip,
    Status,
    FreeSpace,
    Resources,
    Environments,
}

impl From<SortColumn> for SortField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Hostname => Self::Hostname,
            SortColumn::Sandbox => Self::Sandbox,
            SortColumn::Os => Self::OperatingSystem,
            SortColumn::Ip => Self::IpAddress,
            SortColumn::Status => Self::Status,
            SortColumn::FreeSpace => Self::FreeSpace,
            SortColumn::Resources => Self::Resources,
            SortColumn::Environments => Self::Environments,
        }
    }
}

/// Run an agents subcommand.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or a sort column does
/// not exist on the requested table.
pub fn run(ctx: &OutputContext, cmd: AgentsCommand, json_output: bool) -> Result<()> {
    match cmd {
        AgentsCommand::List(args) => run_list(ctx, &args, json_output),
        AgentsCommand::Count(args) => run_count(ctx, &args, json_output),
    }
}

fn run_list(ctx: &OutputContext, args: &ListArgs, json_output: bool) -> Result<()> {
    let fleet = load_fleet(&args.snapshot, args.filter.as_deref(), json_output)?;

    let mut rows: Vec<&Agent> = match args.state {
        Some(state) => fleet.filter_by(state.into()),
        None => fleet.list(),
    };
    rows.retain(|agent| agent.is_elastic() == args.elastic);

    let table = if args.elastic {
        AgentTableKind::Elastic
    } else {
        AgentTableKind::Static
    };
    let mut handler = SortHandler::new(table);
    if let Some(sort) = args.sort {
        let column = resolve_sort_column(table, sort)?;
        handler.on_column_click(column);
        if args.desc {
            handler.on_column_click(column);
        }
    }
    if let (Some(field), Some(order)) = (handler.current_field(), handler.current_order()) {
        let cmp = compare(field, order);
        rows.sort_by(|a, b| cmp(a, b));
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        render_table(ctx, &fleet, &rows, table);
    }
    Ok(())
}

fn run_count(ctx: &OutputContext, args: &CountArgs, json_output: bool) -> Result<()> {
    let fleet = load_fleet(&args.snapshot, args.filter.as_deref(), json_output)?;

    let matching = fleet.list().len();
    let pending = fleet.filter_by(AgentConfigState::Pending).len();
    let enabled = fleet.filter_by(AgentConfigState::Enabled).len();
    let disabled = fleet.filter_by(AgentConfigState::Disabled).len();

    if json_output {
        let obj = serde_json::json!({
            "total": fleet.total_count(),
            "matching": matching,
            "pending": pending,
            "enabled": enabled,
            "disabled": disabled,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        ctx.kv("Total:", &fleet.total_count().to_string());
        ctx.kv("Matching:", &matching.to_string());
        ctx.kv("Pending:", &pending.to_string());
        ctx.kv("Enabled:", &enabled.to_string());
        ctx.kv("Disabled:", &disabled.to_string());
    }
    Ok(())
}

/// Load the snapshot and build the view-model. On failure under `--json`,
/// emit the machine-readable error object before propagating.
fn load_fleet(source: &str, filter: Option<&str>, json_output: bool) -> Result<Fleet> {
    let agents = match snapshot::load(source) {
        Ok(agents) => agents,
        Err(err) => {
            if json_output {
                println!("{}", json::format_error(&format!("{err:#}"), "SNAPSHOT_UNREADABLE")?);
            }
            return Err(err);
        }
    };
    let mut fleet = Fleet::new();
    fleet.sync(agents);
    fleet.set_filter_text(filter);
    Ok(fleet)
}

fn resolve_sort_column(table: AgentTableKind, sort: SortColumn) -> Result<usize> {
    let field = SortField::from(sort);
    table.field_column(field).ok_or_else(|| {
        TableError::ColumnNotSortable {
            column: format!("{sort:?}").to_lowercase(),
            table: table_label(table),
        }
        .into()
    })
}

const fn table_label(table: AgentTableKind) -> &'static str {
    match table {
        AgentTableKind::Static => "static",
        AgentTableKind::Elastic => "elastic",
    }
}

fn render_table(ctx: &OutputContext, fleet: &Fleet, rows: &[&Agent], table: AgentTableKind) {
    ctx.header(&format!(
        "{} agents ({} of {} shown)",
        match table {
            AgentTableKind::Static => "Static",
            AgentTableKind::Elastic => "Elastic",
        },
        rows.len(),
        fleet.total_count(),
    ));

    if rows.is_empty() {
        ctx.info("No agents match.");
        return;
    }

    if !ctx.quiet {
        print_row(table, "HOSTNAME", "SANDBOX", "OS", "IP", "STATUS", "FREE", "RESOURCES", "ENVIRONMENTS");
    }
    for agent in rows {
        print_row(
            table,
            cell(agent.hostname.as_deref()),
            cell(agent.sandbox.as_deref()),
            cell(agent.operating_system.as_deref()),
            cell(agent.ip_address.as_deref()),
            agent.status().label(),
            &agent.readable_free_space(),
            &agent.resources_label(),
            &agent.environments_label(),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn print_row(
    table: AgentTableKind,
    hostname: &str,
    sandbox: &str,
    os: &str,
    ip: &str,
    status: &str,
    free: &str,
    resources: &str,
    environments: &str,
) {
    match table {
        AgentTableKind::Static => println!(
            "  {hostname:<18} {sandbox:<22} {os:<14} {ip:<15} {status:<21} {free:>10}  {resources:<20} {environments}"
        ),
        // The elastic table has no resources column.
        AgentTableKind::Elastic => println!(
            "  {hostname:<18} {sandbox:<22} {os:<14} {ip:<15} {status:<21} {free:>10}  {environments}"
        ),
    }
}

/// Display form of a possibly-absent field.
fn cell(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
