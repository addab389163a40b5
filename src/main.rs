use rand::SeedableRng;
use rand::rngs::SmallRng;

use klondike_rs::difficulty::Difficulty;
use klondike_rs::renderer::CliRenderer;
use klondike_rs::session::Session;

fn main() {
    println!(
        r#"
┌─────────────────────────────────────────┐
│     Klondike Solitaire (CLI Edition)    │
│   Type 'help' or '?' for commands.      │
└─────────────────────────────────────────┘
"#
    );

    // Optional seed for reproducible games and optional difficulty, in any order.
    let mut seed: Option<u64> = None;
    let mut difficulty = Difficulty::default();
    for arg in std::env::args().skip(1) {
        if let Ok(n) = arg.parse() {
            seed = Some(n);
        } else if let Some(d) = Difficulty::parse(&arg) {
            difficulty = d;
        } else {
            eprintln!("[WARN] Ignoring unknown argument '{}'", arg);
        }
    }

    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut session = Session::new(rng, seed, difficulty, CliRenderer::new());
    session.run();
}
