//! Gpus command handler.
//!
//! Lists the inventory in index order, which is the order the `gpu`
//! setting refers to.

use anyhow::Result;
use serde_json::Value;

use crate::bootstrap::CliContext;
use crate::presentation::{gpu_json, print_separator};

/// JSON entries for every GPU, in index order.
pub fn listing(ctx: &CliContext) -> Vec<Value> {
    ctx.inventory
        .gpus()
        .iter()
        .enumerate()
        .map(|(i, gpu)| gpu_json(i, gpu.as_ref()))
        .collect()
}

/// Execute the gpus command.
pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&listing(ctx))?);
        return Ok(());
    }

    let gpus = ctx.inventory.gpus();

    if gpus.is_empty() {
        println!("No GPUs detected.");
        return Ok(());
    }

    println!(
        "{:<6} {:<8} {:<14} {:<11} {:<10} {:<7} Panel",
        "Index", "Card", "PCI slot", "Vendor:Dev", "Driver", "Family"
    );
    print_separator(66);

    for (index, gpu) in gpus.iter().enumerate() {
        let card = gpu.card();
        let driver = if card.driver.is_empty() {
            "--"
        } else {
            card.driver.as_str()
        };
        println!(
            "{:<6} {:<8} {:<14} {:<11} {:<10} {:<7} {}",
            index,
            card.card,
            card.pci_slot,
            card.vendor_device(),
            driver,
            gpu.family().to_string(),
            if card.embedded_display { "yes" } else { "no" }
        );
    }

    println!();
    println!("Pin a launch with: gpupin env --gpu <index>  (or prime:<index>)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpupin_core::Settings;

    use crate::handlers::test_support::{Prime, context};

    #[test]
    fn test_json_listing_follows_inventory_order() {
        let ctx = context(Settings::default(), Prime::Unsupported);
        let list = listing(&ctx);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["index"], 0);
        assert_eq!(list[0]["card"], "card0");
        assert_eq!(list[0]["family"], "mesa");
        assert_eq!(list[1]["index"], 1);
        assert_eq!(list[1]["card"], "card1");
        assert_eq!(list[1]["family"], "nvidia");
    }

    #[test]
    fn test_table_output_succeeds() {
        let ctx = context(Settings::default(), Prime::Unsupported);
        execute(&ctx, false).unwrap();
        execute(&ctx, true).unwrap();
    }
}
