mod app;
mod guide;
mod options;
mod pointer;

use anyhow::Result;
use winit::dpi::LogicalSize;

use lagscope_engine::device::GpuInit;
use lagscope_engine::logging::{init_logging, LoggingConfig};
use lagscope_engine::window::{Runtime, RuntimeConfig};

use app::ProbeApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Key reference — printed before the window opens.
    println!();
    println!("  ╔══════════════════════════════════════════╗");
    println!("  ║              LAGSCOPE PROBE              ║");
    println!("  ║      frame pacing · input latency        ║");
    println!("  ╠══════════════════════════════════════════╣");
    println!("  ║  1  vsync                                ║");
    println!("  ║  2  fullscreen                           ║");
    println!("  ║  3  predict one frame less               ║");
    println!("  ║  4  predict one frame more               ║");
    println!("  ║  5  early clear after present            ║");
    println!("  ║  6  extra sleep (pace to 240 Hz)         ║");
    println!("  ║  7  tear test (flicker clear color)      ║");
    println!("  ║  Esc  quit                               ║");
    println!("  ╚══════════════════════════════════════════╝");
    println!();

    let config = RuntimeConfig {
        title: "lagscope".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    Runtime::run(config, GpuInit::default(), ProbeApp::new())
}
