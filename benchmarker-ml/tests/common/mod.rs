//! Builds small resource bundles in temporary directories.

#![allow(dead_code)]

use benchmarker_ml::BenchConfig;
use benchmarker_ml::config::ImageConfig;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tempfile::TempDir;

pub const IMAGE_RESOURCES: &[&str] = &["ClassifierData", "Animals"];

const LANGUAGES: &[&str] = &["english", "german", "polish", "french"];
const PAYMENT_TYPES: &[&str] = &["PAYMENT", "TRANSFER", "CASH_OUT", "DEBIT"];

/// A temporary bundle containing every built-in resource.
pub fn resource_bundle() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for resource in IMAGE_RESOURCES {
        write_image_resource(&dir.path().join(resource));
    }
    write_payment_fraud(&dir.path().join("PaymentFraud.csv"));
    write_steam_reviews(&dir.path().join("SteamReviewsCleaned.csv"));
    dir
}

/// Configuration pointing at `root`, with tiny thumbnails to keep fits fast.
pub fn config_for(root: &Path) -> BenchConfig {
    BenchConfig {
        resources_dir: root.to_path_buf(),
        image: ImageConfig { thumbnail_side: 4 },
        ..BenchConfig::default()
    }
}

/// `Training/` and `Testing/` with a reddish and a bluish class.
pub fn write_image_resource(root: &Path) {
    for (split, count) in [("Training", 8u8), ("Testing", 3u8)] {
        for (label, base) in [("red", [220u8, 30, 30]), ("blue", [30u8, 30, 220])] {
            let dir = root.join(split).join(label);
            std::fs::create_dir_all(&dir).unwrap();
            for i in 0..count {
                let shade = i * 3;
                let color = [
                    base[0].saturating_sub(shade),
                    base[1] + shade,
                    base[2].saturating_sub(shade),
                ];
                RgbImage::from_pixel(8, 8, Rgb(color))
                    .save(dir.join(format!("{label}_{i}.png")))
                    .unwrap();
            }
        }
    }
}

/// Fraud rows separable on `amount`, plus a column the scenario does not use.
pub fn write_payment_fraud(path: &Path) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer
        .write_record([
            "step",
            "type",
            "amount",
            "nameOrig",
            "oldbalanceOrg",
            "newbalanceOrig",
            "oldbalanceDest",
            "newbalanceDest",
            "isFraud",
            "isFlaggedFraud",
        ])
        .unwrap();
    for i in 0..120 {
        let fraud = i % 2 == 0;
        let amount: f64 = if fraud {
            rng.gen_range(5_000.0..9_000.0)
        } else {
            rng.gen_range(10.0..500.0)
        };
        let old_balance: f64 = rng.gen_range(0.0..20_000.0);
        let dest_balance: f64 = rng.gen_range(0.0..20_000.0);
        writer
            .write_record([
                (1 + i / 10).to_string(),
                PAYMENT_TYPES[rng.gen_range(0..PAYMENT_TYPES.len())].to_string(),
                format!("{amount:.2}"),
                format!("C{}", 1_000_000 + i),
                format!("{old_balance:.2}"),
                format!("{:.2}", (old_balance - amount).max(0.0)),
                format!("{dest_balance:.2}"),
                format!("{:.2}", dest_balance + amount),
                u8::from(fraud).to_string(),
                "0".to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

/// Review rows whose playtime is a noisy linear function of the other
/// columns. A few rows have missing cells.
pub fn write_steam_reviews(path: &Path) {
    let mut rng = StdRng::seed_from_u64(17);
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer
        .write_record([
            "review_id",
            "language",
            "recommended",
            "votes_helpful",
            "votes_funny",
            "weighted_vote_score",
            "comment_count",
            "steam_purchase",
            "received_for_free",
            "written_during_early_access",
            "author.num_games_owned",
            "author.num_reviews",
            "author.playtime_forever",
            "author.playtime_last_two_weeks",
            "author.playtime_at_review",
            "author.last_played",
        ])
        .unwrap();
    for i in 0..150 {
        let helpful: u32 = rng.gen_range(0..50);
        let funny: u32 = rng.gen_range(0..20);
        let score: f64 = rng.gen_range(0.0..1.0);
        let comments: u32 = rng.gen_range(0..10);
        let games: u32 = rng.gen_range(1..500);
        let reviews: u32 = rng.gen_range(1..60);
        let two_weeks: f64 = rng.gen_range(0.0..300.0);
        let at_review: f64 = rng.gen_range(0.0..5_000.0);
        let last_played: u32 = rng.gen_range(17_000..19_000);
        let flags: [bool; 4] = [rng.r#gen(), rng.r#gen(), rng.r#gen(), rng.r#gen()];
        let playtime = 1.2 * at_review + 0.8 * two_weeks + 3.0 * f64::from(games)
            + rng.gen_range(-5.0..5.0);

        let mut row = vec![
            i.to_string(),
            LANGUAGES[rng.gen_range(0..LANGUAGES.len())].to_string(),
            bool_cell(flags[0]),
            helpful.to_string(),
            funny.to_string(),
            format!("{score:.4}"),
            comments.to_string(),
            bool_cell(flags[1]),
            bool_cell(flags[2]),
            bool_cell(flags[3]),
            games.to_string(),
            reviews.to_string(),
            format!("{playtime:.1}"),
            format!("{two_weeks:.1}"),
            format!("{at_review:.1}"),
            last_played.to_string(),
        ];
        if i % 25 == 3 {
            row[4].clear();
        }
        writer.write_record(&row).unwrap();
    }
    writer.flush().unwrap();
}

fn bool_cell(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}
