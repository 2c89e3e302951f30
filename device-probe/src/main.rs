use device_id::network::ping_host;
use device_probe::{probe, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    let config = setup_environment();
    tracing::debug!(?config, "Configuration loaded");

    // 2. Collect and print
    let device = probe::collect(&config)?;
    println!("{}", probe::render(&device, config.output_format)?);
    tracing::info!("UDID: {}", device.udid);

    // 3. Optional reachability check
    if let Some(host) = &config.ping_host
        && !ping_host(host, config.ping_port, config.ping_timeout())
    {
        anyhow::bail!("{}:{} is unreachable", host, config.ping_port);
    }

    Ok(())
}
