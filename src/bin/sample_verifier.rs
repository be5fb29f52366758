use spotcheck::{derive_indices, Error};
use tracing_subscriber::EnvFilter;

const DEMO_SEED: &[u8] = b"demo-seed";
const DEMO_N_TOTAL: usize = 1000;
const DEMO_K: usize = 10;

fn render_indices(indices: &[usize]) -> String {
    format!("Challenge indices: {indices:?}")
}

fn demo_line() -> Result<String, Error> {
    let indices = derive_indices(DEMO_SEED, DEMO_N_TOTAL, DEMO_K)?;
    Ok(render_indices(&indices))
}

fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("{}", demo_line()?);
    Ok(())
}
