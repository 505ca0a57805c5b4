#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use tiny3d_engine::bootstrap::{BootConfig, ResizePolicy};
    use tiny3d_engine::logging::{init_logging, LoggingConfig};
    use tiny3d_engine::window::{Runtime, RuntimeConfig};

    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "tiny3d studio".to_string(),
        boot: BootConfig {
            resize: ResizePolicy::Track,
            ..BootConfig::default()
        },
        ..RuntimeConfig::default()
    };

    log::info!("starting tiny3d studio");
    Runtime::run(config, tiny3d_studio::demo::DemoEngine::new)
}

// In the browser the library's `#[wasm_bindgen(start)]` is the entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
