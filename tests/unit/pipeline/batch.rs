use std::path::PathBuf;

use super::*;
use crate::foundation::core::Canvas;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "traitmint_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// Trait table with 2 x 3 = 6 combinations and 4x4 solid-color layers.
fn fixture(root: &Path) -> MintConfig {
    let assets = root.join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    let layers: [(&str, [u8; 4]); 5] = [
        ("bg_dark.png", [10, 10, 10, 255]),
        ("bg_light.png", [240, 240, 240, 255]),
        ("mark_a.png", [255, 0, 0, 128]),
        ("mark_b.png", [0, 255, 0, 128]),
        ("mark_c.png", [0, 0, 255, 128]),
    ];
    for (name, px) in layers {
        image::RgbaImage::from_pixel(4, 4, image::Rgba(px))
            .save(assets.join(name))
            .unwrap();
    }
    std::fs::write(
        root.join("traits.tsv"),
        "name\tgroup\torder\tweight\tkey\tvalue\n\
         mark_a.png\tmark\t1\t1\tMark\tA\n\
         mark_b.png\tmark\t1\t1\tMark\tB\n\
         mark_c.png\tmark\t1\t1\tMark\tC\n\
         bg_dark.png\tbackground\t0\t1\tBackground\tDark\n\
         bg_light.png\tbackground\t0\t1\tBackground\tLight\n",
    )
    .unwrap();

    MintConfig {
        trait_table: PathBuf::from("traits.tsv"),
        asset_dir: PathBuf::from("assets"),
        image_dir: PathBuf::from("out/images"),
        metadata_dir: PathBuf::from("out/metadata"),
        count: 6,
        seed: Some(2024),
        canvas: Canvas {
            width: 4,
            height: 4,
        },
        ..MintConfig::default()
    }
    .with_base_dir(root)
}

fn read_dir_sorted(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let p = e.unwrap().path();
            (
                p.file_name().unwrap().to_string_lossy().to_string(),
                std::fs::read(&p).unwrap(),
            )
        })
        .collect::<Vec<_>>();
    out.sort();
    out
}

#[test]
fn check_batch_reports_groups_and_space() {
    let root = temp_dir("batch_check");
    let cfg = fixture(&root);

    let report = check_batch(&cfg).unwrap();
    assert_eq!(
        report.groups,
        vec![("mark".to_string(), 3), ("background".to_string(), 2)]
    );
    assert_eq!(report.layers, 5);
    assert_eq!(report.combination_space, 6);
    assert!(report.fits());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn run_batch_writes_one_image_and_one_record_per_combination() {
    let root = temp_dir("batch_run");
    let cfg = fixture(&root);

    let stats = run_batch(&cfg, &BatchThreading::default()).unwrap();
    assert_eq!(stats.combinations, 6);
    assert_eq!(stats.images_written, 6);
    assert_eq!(stats.seed, 2024);

    let images = read_dir_sorted(&cfg.image_dir_path());
    let names = images.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["1.png", "2.png", "3.png", "4.png", "5.png", "6.png"]
    );
    let metadata = read_dir_sorted(&cfg.metadata_dir_path());
    assert_eq!(metadata.len(), 6);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn parallel_output_matches_sequential_output() {
    let root_seq = temp_dir("batch_seq");
    let root_par = temp_dir("batch_par");
    let seq = fixture(&root_seq);
    let par = fixture(&root_par);

    run_batch(&seq, &BatchThreading::default()).unwrap();
    run_batch(
        &par,
        &BatchThreading {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();

    assert_eq!(
        read_dir_sorted(&seq.image_dir_path()),
        read_dir_sorted(&par.image_dir_path())
    );
    assert_eq!(
        read_dir_sorted(&seq.metadata_dir_path()),
        read_dir_sorted(&par.metadata_dir_path())
    );

    std::fs::remove_dir_all(&root_seq).ok();
    std::fs::remove_dir_all(&root_par).ok();
}

#[test]
fn exhausted_request_writes_nothing() {
    let root = temp_dir("batch_exhausted");
    let cfg = MintConfig {
        count: 7,
        ..fixture(&root)
    };

    let err = run_batch(&cfg, &BatchThreading::default()).unwrap_err();
    assert!(matches!(err, TraitmintError::Generation(_)));
    assert!(!cfg.image_dir_path().exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_asset_fails_before_output() {
    let root = temp_dir("batch_missing_asset");
    let cfg = fixture(&root);
    std::fs::remove_file(root.join("assets").join("mark_b.png")).unwrap();

    let err = run_batch(&cfg, &BatchThreading::default()).unwrap_err();
    assert!(err.to_string().contains("mark_b.png"));
    assert!(!cfg.metadata_dir_path().exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(1)).is_ok());
}
