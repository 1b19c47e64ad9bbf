//! Text rendering for portfolio reports.
//!
//! Renders records and aggregates as grouped, human-readable output. All
//! display formatting lives here; the library crates only ever exchange
//! enum and code values.

use patlas_analytics::{
    PortfolioStrength, ValidityBand, category_counts, grade_tally, portfolio_matrix, status_tally,
};
use patlas_core::{Axis, DetailStatus, Grade, PatentRecord, Taxonomy};

/// Cell count at which a matrix cell reads as a strength area.
const MATRIX_STRENGTH_THRESHOLD: usize = 30;

// ── Portfolio stats ──

/// Print status and grade tallies with the derived portfolio metrics.
pub fn print_stats(records: &[PatentRecord]) {
    let status = status_tally(records);
    let grades = grade_tally(records);

    println!("=== Portfolio ===");
    println!();

    println!("Status");
    println!("  {:<26} {}", "total", status.total);
    println!("  {:<26} {}", "active", status.active);
    println!("  {:<26} {}", "inactive", status.inactive);
    for detail in DetailStatus::ALL {
        let count = status.detail_count(detail);
        if count > 0 {
            println!("  {:<26} {}", detail.as_str(), count);
        }
    }
    println!();

    println!("Grades");
    for grade in Grade::ALL {
        println!(
            "  {:<26} {:>4}  {:>5.1}%",
            grade.as_str(),
            grades.count(grade),
            grades.share(grade)
        );
    }
    println!();

    println!("  {:<26} {}", "core (S+A)", grades.core_count());
    println!("  {:<26} {}", "analyzed", grades.major_count());
    println!("  {:<26} {:.3}", "core ratio", grades.core_ratio());
    println!(
        "  {:<26} {}",
        "portfolio strength",
        PortfolioStrength::classify(grades.core_count())
    );
}

// ── Two-axis matrix ──

/// Print the sparse two-axis matrix with axis labels from the taxonomy.
pub fn print_matrix(records: &[PatentRecord], taxonomy: &Taxonomy) {
    let matrix = portfolio_matrix(records);

    println!("=== Portfolio matrix ===");
    println!();

    for (key, count) in matrix.cells() {
        let name1 = taxonomy
            .lookup(&key.category1)
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        let name2 = key
            .category2
            .as_deref()
            .and_then(|code| taxonomy.lookup(code).ok())
            .map(|c| c.name.as_str())
            .unwrap_or("unclassified");
        println!("  {:<18} {:>4}   {} × {}", key.to_string(), count, name1, name2);
    }
    println!();

    println!("  {:<26} {}", "patents", matrix.total());
    println!("  {:<26} {}", "occupied cells", matrix.occupied_cells());
    println!(
        "  {:<26} {}",
        "strength cells",
        matrix.strength_cells(MATRIX_STRENGTH_THRESHOLD)
    );
}

// ── Record list ──

/// Print one line per matching record.
pub fn print_list(matched: &[&PatentRecord]) {
    if matched.is_empty() {
        println!("no matching records");
        return;
    }

    for record in matched {
        let grade = record.grade.map(|g| g.as_str()).unwrap_or("-");
        let category2 = record.category2.as_deref().unwrap_or("-");
        println!(
            "  {:<12} {:>2}  {:<9} {:<17} {:>3}  {}/{:<4} {}",
            record.id,
            grade,
            record.status.as_str(),
            record.detail_status.as_str(),
            record.validity_score,
            record.category1,
            category2,
            record.title,
        );
    }
    println!();
    println!("  {} record(s)", matched.len());
}

// ── Record card ──

/// Print a single record as a vertical card grouped by section.
pub fn print_record_card(record: &PatentRecord, taxonomy: &Taxonomy) {
    println!("=== {} ===", record.id);
    println!("{}", record.title);
    println!();

    println!("Identity");
    if let Some(number) = &record.application_number {
        println!("  {:<26} {}", "application_number", number);
    }
    println!("  {:<26} {}", "application_date", record.application_date);
    if let Some(expiry) = record.expiry_date {
        println!("  {:<26} {}", "expiry_date", expiry);
    }
    println!();

    println!("Classification");
    print_category_line("category1", &record.category1, taxonomy);
    if let Some(category2) = &record.category2 {
        print_category_line("category2", category2, taxonomy);
    }
    println!();

    println!("Status");
    println!("  {:<26} {}", "status", record.status);
    println!("  {:<26} {}", "detail_status", record.detail_status);
    println!();

    println!("Assessment");
    println!(
        "  {:<26} {} ({})",
        "validity_score",
        record.validity_score,
        ValidityBand::of(record.validity_score).as_str()
    );
    match record.grade {
        Some(grade) => println!("  {:<26} {}  {}", "grade", grade, grade.description()),
        None => println!("  {:<26} ungraded (reads as X)", "grade"),
    }
    if let Some(reason) = &record.grade_reason {
        println!("  {:<26} {}", "grade_reason", reason);
    }
}

fn print_category_line(label: &str, code: &str, taxonomy: &Taxonomy) {
    match taxonomy.lookup(code) {
        Ok(category) => println!("  {:<26} {}  {}", label, code, category.name),
        Err(_) => println!("  {:<26} {}", label, code),
    }
}

// ── Taxonomy ──

/// Print both axes with recomputed per-category counts.
pub fn print_taxonomy(records: &[PatentRecord], taxonomy: &Taxonomy) {
    for axis in Axis::BOTH {
        let counts = category_counts(records, axis);
        println!("=== Axis {} ({}) ===", axis.number(), axis);
        for major in taxonomy.majors(axis) {
            let count = counts.get(&major.code).copied().unwrap_or(0);
            println!("  {:<6} {:<26} {:>4}", major.code, major.name, count);
            for minor in &major.minors {
                let count = counts.get(&minor.code).copied().unwrap_or(0);
                println!("    {:<6} {:<24} {:>4}", minor.code, minor.name, count);
            }
        }
        println!();
    }
}
