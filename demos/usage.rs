use qmkit::*;

fn main() -> Result<(), QmError> {
    env_logger::init();
    println!("A simple example!");

    let mut table = TruthTable::default();
    for (term, output) in [
        ("0000", "1"),
        ("0001", "1"),
        ("0011", "1"),
        ("0010", "1"),
        ("0110", "1"),
        ("1-11", "0"),
        ("0111", "X"),
    ] {
        table.push_str(term, output)?;
    }

    let primes = table.minimize(&Minimizer::default())?;
    println!("{} prime implicants in {} rounds:", primes.len(), primes.rounds());
    for p in &primes {
        println!("{} 1", p);
    }
    Ok(())
}
