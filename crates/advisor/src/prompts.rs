//! Prompt construction.
//!
//! Prompts are written in Indonesian for the audience of the source site.
//! Prices from the feed are digit strings; they are grouped with dots for
//! readability before being put into a prompt.

use price_feed::PriceRow;

use crate::advice::{PortfolioSnapshot, SavingsGoal};

/// Market commentary for the day, optionally anchored on the cached price
pub fn market_summary_prompt(price: Option<&PriceRow>) -> String {
    let mut prompt = String::from(
        "Kamu adalah analis pasar emas di Indonesia. \
         Tulis ringkasan kondisi pasar emas hari ini dalam maksimal 3 kalimat, \
         gunakan bahasa Indonesia yang santai namun profesional.",
    );

    if let Some(row) = price {
        prompt.push_str(&format!(
            "\n\nData harga emas {} hari ini: harga jual Rp {}, harga beli kembali Rp {}.",
            row.gramasi,
            group_thousands(&row.harga_jual),
            group_thousands(&row.harga_beli),
        ));
    } else {
        prompt.push_str("\n\nData harga hari ini belum tersedia; berikan gambaran umum saja.");
    }

    prompt.push_str("\nJangan berikan janji keuntungan.");
    prompt
}

/// Insight for a holder's gold portfolio
pub fn portfolio_insight_prompt(snapshot: &PortfolioSnapshot, price: Option<&PriceRow>) -> String {
    let mut prompt = format!(
        "Kamu adalah penasihat keuangan yang memahami investasi emas. \
         Seorang investor memiliki total {} gram emas dengan harga beli rata-rata Rp {} per gram \
         dan total keuntungan/kerugian saat ini Rp {}.",
        format_grams(snapshot.total_emas),
        format_amount(snapshot.avg_beli),
        format_amount(snapshot.total_profit),
    );

    if let Some(row) = price {
        prompt.push_str(&format!(
            " Harga beli kembali emas {} saat ini Rp {}.",
            row.gramasi,
            group_thousands(&row.harga_beli)
        ));
    }

    prompt.push_str(
        "\nBerikan insight singkat (maksimal 4 kalimat) tentang kondisi portofolio ini \
         dan satu saran praktis.",
    );
    prompt
}

/// Savings plan towards a gold-denominated goal
pub fn goal_plan_prompt(goal: &SavingsGoal, price: Option<&PriceRow>) -> String {
    let mut prompt = format!(
        "Kamu adalah perencana keuangan. Pengguna ingin mencapai tujuan \"{}\" \
         dengan target dana Rp {} dalam {} tahun. Nilai tabungan emas saat ini Rp {}.",
        goal.name.trim(),
        format_amount(goal.target),
        format_years(goal.years),
        format_amount(goal.current_value),
    );

    if let Some(row) = price {
        prompt.push_str(&format!(
            " Harga jual emas {} saat ini Rp {}.",
            row.gramasi,
            group_thousands(&row.harga_jual)
        ));
    }

    prompt.push_str(
        "\nSusun rencana menabung emas per bulan yang realistis, \
         sebutkan perkiraan gram per bulan, dan tutup dengan satu tips. Maksimal 5 kalimat.",
    );
    prompt
}

/// `"1000000"` → `"1.000.000"`
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Whole-rupiah amount with grouping; negatives keep their sign
fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    if rounded < 0.0 {
        format!("-{}", group_thousands(&digits))
    } else {
        group_thousands(&digits)
    }
}

fn format_grams(value: f64) -> String {
    trim_decimal(format!("{:.3}", value))
}

fn format_years(value: f64) -> String {
    trim_decimal(format!("{:.1}", value))
}

fn trim_decimal(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
