//! Effect-queue executor for store-emitted side effects.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the executor that drains queued runtime effects in emission order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the batch before running it so effects queued by nested operations land in a fresh
    // batch and re-trigger this effect.
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }

        let batch = runtime
            .effects
            .try_update(std::mem::take)
            .unwrap_or_default();
        let host = runtime.host.get_value();
        for effect in batch {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
