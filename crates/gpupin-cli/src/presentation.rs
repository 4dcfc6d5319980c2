//! Shared CLI presentation utilities.
//!
//! Format-only helpers; no domain decisions here.

use gpupin_core::{EnvMap, GpuDevice};
use serde_json::{Value, json};

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Environment as sorted `KEY=VALUE` lines.
pub fn env_lines(env: &EnvMap) -> Vec<String> {
    let mut lines: Vec<String> = env.iter().map(|(k, v)| format!("{k}={v}")).collect();
    lines.sort();
    lines
}

/// Environment as a JSON object with sorted keys.
pub fn env_json(env: &EnvMap) -> Value {
    let sorted: serde_json::Map<String, Value> = env
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(sorted)
}

/// One GPU as a JSON object, including its inventory index.
pub fn gpu_json(index: usize, gpu: &dyn GpuDevice) -> Value {
    let card = gpu.card();
    json!({
        "index": index,
        "card": card.card,
        "pci_slot": card.pci_slot,
        "vendor_id": card.vendor_id,
        "device_id": card.device_id,
        "driver": card.driver,
        "family": gpu.family(),
        "embedded_display": card.embedded_display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpupin_core::{GpuCard, device_for_card};

    #[test]
    fn test_env_lines_sorted() {
        let env = EnvMap::from([
            ("WINEDEBUG".to_string(), "-all".to_string()),
            ("DRI_PRIME".to_string(), "1".to_string()),
        ]);
        assert_eq!(env_lines(&env), ["DRI_PRIME=1", "WINEDEBUG=-all"]);
        assert_eq!(env_json(&env)["DRI_PRIME"], "1");
    }

    #[test]
    fn test_gpu_json_fields() {
        let gpu = device_for_card(GpuCard {
            card: "card1".to_string(),
            pci_slot: "0000:01:00.0".to_string(),
            vendor_id: "10de".to_string(),
            device_id: "1f95".to_string(),
            driver: "nvidia".to_string(),
            embedded_display: false,
        });

        let value = gpu_json(1, gpu.as_ref());
        assert_eq!(value["index"], 1);
        assert_eq!(value["family"], "nvidia");
        assert_eq!(value["embedded_display"], false);
    }
}
