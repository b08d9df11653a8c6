use anyhow::{Context, Result};
use tracing::{info, info_span};

use effects_cli::report::{candidates_table, detail_table, overview_table};
use effects_cli::session::{Session, SessionInputs};
use effects_core::{SLOT_COUNT, Viewport, compute_layout, initial_selection};

use crate::cli::{DetailArgs, InputArgs, OverviewArgs};

fn session_inputs(args: &InputArgs) -> SessionInputs {
    SessionInputs {
        data: args.data.clone(),
        config: args.config.clone(),
        costs: args.costs.clone(),
    }
}

pub fn run_candidates(args: &InputArgs) -> Result<()> {
    let session = Session::load(&session_inputs(args))?;
    println!("{}", session.config.patch_label);
    println!(
        "{}",
        candidates_table(&session.candidates, session.dataset.group_max_n())
    );
    Ok(())
}

pub fn run_overview(args: &OverviewArgs) -> Result<()> {
    let session = Session::load(&session_inputs(&args.input))?;
    let selection = if args.select.is_empty() {
        initial_selection(
            session.config.targets.as_deref(),
            &session.candidates,
            SLOT_COUNT,
        )
    } else {
        args.select.clone()
    };
    let span = info_span!("overview", rows = selection.len(), width = args.width);
    let _guard = span.enter();

    let result = compute_layout(
        &session.dataset,
        &session.config,
        &selection,
        None,
        Viewport::uniform(args.width),
    );
    let overview = result.overview;
    info!(
        items = overview.items().count(),
        height = overview.height,
        "computed overview"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&overview).context("serialize overview")?;
        println!("{json}");
    } else {
        println!(
            "{}  {} rows, {}x{} px",
            session.config.patch_label,
            overview.row_count(),
            overview.width,
            overview.height
        );
        println!("{}", overview_table(&overview));
    }
    Ok(())
}

pub fn run_detail(args: &DetailArgs) -> Result<()> {
    let session = Session::load(&session_inputs(&args.input))?;
    let span = info_span!("detail", key = %args.key, width = args.width);
    let _guard = span.enter();

    let result = compute_layout(
        &session.dataset,
        &session.config,
        &[],
        Some(&args.key),
        Viewport::uniform(args.width),
    );
    let detail = result
        .detail
        .context("detail layout missing for requested key")?;
    info!(rows = detail.row_count(), "computed detail");

    if args.json {
        let json = serde_json::to_string_pretty(&detail).context("serialize detail")?;
        println!("{json}");
    } else {
        println!(
            "{} ★{}  {}  N={}",
            detail.display_name,
            detail.key.star(),
            session.config.patch_label,
            effects_cli::report::format_number(detail.total_n)
        );
        println!("{}", detail_table(&detail));
    }
    Ok(())
}
