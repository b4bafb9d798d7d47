//! Wiring between configuration, repositories and the terminal host.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tier_core::db::RepositoryRegistry;
use tier_core::wizard::{Route, WizardController, WizardExit};
use tier_core::{PricingTier, TierRepository};
use tier_db_sqlite::SqliteRepositoryFactory;
use tracing::debug;

use crate::config::AppConfig;
use crate::terminal::TerminalHost;

/// Registry with every backend this binary ships: `memory` and `sqlite`.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::with_builtin();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

pub async fn open_repository(config: &AppConfig) -> Result<Box<dyn TierRepository>> {
    let db_config = config.db_config();
    build_registry()
        .create(&db_config)
        .await
        .with_context(|| {
            format!(
                "failed to open {} backend at '{}'",
                db_config.backend, db_config.connection_string
            )
        })
}

/// Runs the onboarding wizard on `input`/`output`, then follows its exit
/// route: the tier listing after a confirm, a notice after a cancel.
pub async fn onboard<R: BufRead, W: Write>(
    repository: &dyn TierRepository,
    input: R,
    output: &mut W,
    print_payload: bool,
) -> Result<WizardExit> {
    let mut wizard = WizardController::new();
    let exit = TerminalHost::new(input, &mut *output)
        .print_payload(print_payload)
        .run(&mut wizard, repository)
        .await?;

    match exit.route {
        Route::PricingTiers => {
            if let Some(receipt) = &exit.receipt {
                writeln!(output, "Saved tier #{}.", receipt.id)?;
            }
            print_tiers(repository, output).await?;
        }
        Route::Dashboard => {
            writeln!(output, "Onboarding cancelled. Nothing was saved.")?;
        }
    }
    debug!(route = exit.route.path(), "wizard exited");
    Ok(exit)
}

/// Sum of the estimated MRR of every tier whose price and customer count
/// are numeric.
pub fn total_mrr(tiers: &[PricingTier]) -> Decimal {
    tiers.iter().filter_map(PricingTier::estimated_mrr).sum()
}

pub async fn print_tiers<W: Write>(
    repository: &dyn TierRepository,
    output: &mut W,
) -> Result<()> {
    let tiers = repository
        .list_tiers()
        .await
        .context("failed to load pricing tiers")?;

    writeln!(output)?;
    writeln!(output, "== Pricing Tiers ==")?;
    if tiers.is_empty() {
        writeln!(output, "No pricing tiers yet. Run `tier-tester onboard` to add one.")?;
        return Ok(());
    }
    for tier in &tiers {
        writeln!(output, "{tier}")?;
    }
    writeln!(output, "Total est. MRR: {}", total_mrr(&tiers))?;
    Ok(())
}
