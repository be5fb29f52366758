use spotcheck::{decode_seed_hex, Error, TestVectors};

fn main() -> Result<(), Error> {
    // Seed, job and sizes used by the reference vectors.
    let seed = decode_seed_hex(&"aa".repeat(32))?;
    let job_id: u32 = std::env::var("VECTORS_JOB_ID")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let n: u32 = 100;
    let k: u32 = 10;

    let vectors = TestVectors::generate(&seed, job_id, n, k)?;
    vectors.verify()?;

    eprintln!(
        "generated {} challenges, root {}",
        vectors.results.challenge_indices.len(),
        hex::encode(vectors.results.merkle_root)
    );
    println!("{}", vectors.to_json_pretty()?);
    Ok(())
}
