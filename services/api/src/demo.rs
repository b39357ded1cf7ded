use crate::infra::{modifier_selection, scorecard_engine};
use civic_engine::config::AppConfig;
use civic_engine::error::AppError;
use civic_engine::methodology::{
    write_scorecard_csv, ModifierImpact, RankingEntry, Scorecard, ScorecardEngine,
};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

const BAR_WIDTH: usize = 20;
const DEMO_POLICY: &str = "congress-stock-ban";
const DEMO_MODIFIERS: [&str; 2] = ["strong-penalties", "independent-enforcement"];

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// Policy identifier from the policy catalogue
    pub(crate) policy_id: String,
    /// Modifier to apply; repeat the flag to select several
    #[arg(long = "modifier")]
    pub(crate) modifiers: Vec<String>,
    /// Also write the scorecard to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

fn engine_from_config() -> Result<ScorecardEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(scorecard_engine(&config.dataset)?)
}

pub(crate) fn run_factors() -> Result<(), AppError> {
    let engine = engine_from_config()?;

    println!("Scoring factors");
    for factor in engine.store().registry().list() {
        println!("- {} ({})", factor.label, factor.id);
        println!("    0.0: {}", factor.low_description);
        println!("    1.0: {}", factor.high_description);
    }

    Ok(())
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let ScorecardArgs {
        policy_id,
        modifiers,
        csv,
    } = args;

    let engine = engine_from_config()?;
    let selection = modifier_selection(&modifiers);
    let scorecard = engine.scorecard(&policy_id, &selection)?;
    render_scorecard(&scorecard);

    if let Some(path) = csv {
        let file = File::create(&path)?;
        write_scorecard_csv(&scorecard, file)?;
        println!("\nScorecard written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_rankings() -> Result<(), AppError> {
    let engine = engine_from_config()?;
    render_rankings(&engine.rankings()?);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let engine = engine_from_config()?;

    println!("Civic Engine methodology demo");
    println!(
        "{} policies scored across {} factors",
        engine.store().len(),
        engine.store().registry().len()
    );

    println!("\nBase scorecard");
    let base = engine.scorecard(DEMO_POLICY, &[])?;
    render_scorecard(&base);

    let selection = modifier_selection(&DEMO_MODIFIERS.map(String::from));
    println!("\nWith modifiers: {}", DEMO_MODIFIERS.join(", "));
    let adjusted = engine.scorecard(DEMO_POLICY, &selection)?;
    render_scorecard(&adjusted);

    println!("\nModifier impact (each selected alone)");
    render_impacts(&engine.modifier_impacts(DEMO_POLICY)?);

    println!();
    render_rankings(&engine.rankings()?);

    Ok(())
}

fn render_scorecard(scorecard: &Scorecard) {
    println!("{} ({})", scorecard.policy_name, scorecard.policy_id);
    if !scorecard.selected_modifiers.is_empty() {
        let names: Vec<_> = scorecard
            .selected_modifiers
            .iter()
            .map(|id| id.as_str())
            .collect();
        println!("Modifiers: {}", names.join(", "));
    }

    for row in &scorecard.rows {
        let change = if row.delta == 0.0 {
            String::new()
        } else {
            format!(" ({:+.2})", row.delta)
        };
        println!(
            "- {:<36} {} {:.2}{}",
            row.label,
            bar(row.adjusted),
            row.adjusted,
            change
        );
    }

    if scorecard.overall_delta() == 0.0 {
        println!("Overall: {:.3}", scorecard.adjusted_overall);
    } else {
        println!(
            "Overall: {:.3} (base {:.3}, {:+.3})",
            scorecard.adjusted_overall,
            scorecard.base_overall,
            scorecard.overall_delta()
        );
    }
}

fn render_impacts(impacts: &[ModifierImpact]) {
    if impacts.is_empty() {
        println!("- no modifiers authored");
        return;
    }

    for impact in impacts {
        let factors: Vec<_> = impact
            .affected_factors
            .iter()
            .map(|factor| factor.as_str())
            .collect();
        println!(
            "- {}: overall {:.3} ({:+.3}) via {}",
            impact.name,
            impact.adjusted_overall,
            impact.overall_delta,
            factors.join(", ")
        );
    }
}

fn render_rankings(rankings: &[RankingEntry]) {
    println!("Policy rankings");
    for entry in rankings {
        println!(
            "{:>2}. {:<36} {} {:.3}",
            entry.rank,
            entry.policy_name,
            bar(entry.overall),
            entry.overall
        );
    }
}

fn bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
