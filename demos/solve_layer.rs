// demos/solve_layer.rs

use layer_galerkin::{parse_element_count, CoreEngine, ProblemDefinition};
use tracing_subscriber::EnvFilter;

/// Solves the layer problem for an element count given on the command line
/// (default 8) and prints the nodal solution as `x u(x)` rows.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| "8".to_string());
    let num_elements = match parse_element_count(&input) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let problem = ProblemDefinition::new(format!("layer_n{}", num_elements), num_elements);
    let mut engine = CoreEngine::new();

    match engine.run_simulation(&problem) {
        Ok(solution) => {
            println!("# {} ({} elements)", solution.id, num_elements);
            println!("# {:>10} {:>14}", "x", "u(x)");
            for (x, u) in solution.points() {
                println!("{:>12.6} {:>14.8}", x, u);
            }
            if let Some(last) = solution.provenance_chain.last() {
                println!("# solution sha256 {}", last.data_hash);
            }
        }
        Err(e) => {
            eprintln!("Error solving layer problem: {}", e);
            std::process::exit(1);
        }
    }
}
