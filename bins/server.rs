use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    let cfg = match server::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "hbnb", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    server::init_logging(cfg.logging.format);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "hbnb", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "hbnb", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "hbnb",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "hbnb api starting"
    );

    rt.block_on(async move {
        match server::serve(cfg).await {
            Ok(()) => {
                info!(service = "hbnb", event = "stop", %service_id, pid, "hbnb api stopped");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "hbnb", event = "run_failed", error = %e, "hbnb api exited with error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
