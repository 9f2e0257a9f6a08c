use clap::Parser;
use swimbots_core::stats::{energy_histogram, segment_histogram, Histogram, PopulationStats};
use swimbots_io::history::load_history;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "output/history.json.gz")]
    input: String,
}

fn stats_row(label: &str, first: f64, last: f64) -> String {
    format!("| {} | {:.3} | {:.3} |\n", label, first, last)
}

fn histogram_block(title: &str, histogram: &Histogram) -> String {
    let mut out = format!("### {}\n\n", title);
    for (i, count) in histogram.bins.iter().enumerate() {
        out.push_str(&format!(
            "- [{}, {}): {}\n",
            histogram.bin_start(i),
            histogram.bin_start(i + 1),
            count
        ));
    }
    if histogram.outliers > 0 {
        out.push_str(&format!("- out of range: {}\n", histogram.outliers));
    }
    out.push('\n');
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let file = load_history(&args.input)?;

    let (Some(first), Some(last)) = (file.snapshots.first(), file.snapshots.last()) else {
        println!("{} holds no snapshots.", args.input);
        return Ok(());
    };
    let a = PopulationStats::from_pond(first);
    let b = PopulationStats::from_pond(last);

    let mut report = format!(
        "# Swimbots Run Report\n\n\
        - **Seed**: {}\n\
        - **Config fingerprint**: {}\n\
        - **Created**: {}\n\
        - **Generations**: {}\n\n\
        ## Generation 0 vs generation {}\n\n\
        | Metric | First | Last |\n\
        |---|---|---|\n",
        file.seed,
        file.fingerprint,
        file.created_at,
        file.generations(),
        file.generations(),
    );
    report.push_str(&stats_row("Population", a.population as f64, b.population as f64));
    report.push_str(&stats_row("Food", a.food_count as f64, b.food_count as f64));
    report.push_str(&stats_row("Mean energy", a.avg_energy, b.avg_energy));
    report.push_str(&stats_row("Mean age", a.avg_age, b.avg_age));
    report.push_str(&stats_row("Mean segments", a.avg_segments, b.avg_segments));
    report.push_str(&stats_row(
        "Mean translational movement",
        a.avg_translational_movement,
        b.avg_translational_movement,
    ));
    report.push_str(&stats_row(
        "Mean angular movement",
        a.avg_angular_movement,
        b.avg_angular_movement,
    ));
    report.push_str(&stats_row(
        "Mean main segment length",
        a.avg_main_segment_length,
        b.avg_main_segment_length,
    ));
    report.push('\n');

    report.push_str(&histogram_block("Segments, first generation", &segment_histogram(first)));
    report.push_str(&histogram_block("Segments, last generation", &segment_histogram(last)));
    report.push_str(&histogram_block("Energy, last generation", &energy_histogram(last)));

    print!("{}", report);
    Ok(())
}
