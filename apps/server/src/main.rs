use anyhow::Context;
use dhub::domain::config::ApiConfig;
use dhub::kernel::config::load_config;
use dhub_logger::Logger;
use dhub_server::Server;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[dhub_runtime::main(high_performance, thread_name = "dhub-server")]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    let path = std::env::args().nth(1);
    let cfg: ApiConfig = load_config(path).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).config(&cfg.log).init()?;

    Server::builder().config(cfg).build()?.run().await
}
