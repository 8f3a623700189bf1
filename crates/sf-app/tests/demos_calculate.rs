use sf_app::{CalculateOptions, calculate_file, calculate_files};
use sf_results::ErrorKind;
use sf_solver::BalanceConfig;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("demos/requests")
        .join(name)
}

#[test]
fn every_demo_calculates() {
    let paths: Vec<PathBuf> = [
        "01_single_head.json",
        "02_two_heads_tee.json",
        "03_branch_line.json",
        "04_inline_riser.yaml",
    ]
    .into_iter()
    .map(demo)
    .collect();

    let results = calculate_files(&paths, &CalculateOptions::default());
    assert_eq!(results.len(), paths.len());
    for ((path, resp), expected) in results.iter().zip(&paths) {
        assert_eq!(path, expected);
        assert!(resp.success, "{} => {:?}", path.display(), resp.error);
        assert!(resp.total_trykk_bar.unwrap() > 0.0);
    }
}

#[test]
fn branch_line_demo() {
    let resp = calculate_file(&demo("03_branch_line.json"), &CalculateOptions::default());
    assert!(resp.success, "{:?}", resp.error);
    assert_eq!(resp.noder.len(), 4);
    assert_eq!(resp.rettstrekk.len(), 4);

    // Balanced branch: the head sees less than the junction.
    let n2 = resp.node(2).unwrap();
    assert!(n2.is_branch);
    assert!(n2.head_pressure_bar.unwrap() < n2.pressure_at_node_bar);
    assert!(n2.k_equivalent.unwrap() < 80.0);

    // Equivalent K-factor branch: no balancing reported.
    let n3 = resp.node(3).unwrap();
    assert!(n3.is_branch);
    assert!(n3.head_pressure_bar.is_none());

    assert!(!resp.node(4).unwrap().is_branch);

    // Gate DN50 + hinged alarm valve DN50 on section 4.
    assert_eq!(resp.ventil_ekvivalent_lengde, Some(2.78));
    let rs4 = resp.section(4).unwrap();
    assert!(rs4.equivalent_length_m > 2.78);

    // Cumulative flow grows toward the supply.
    for pair in resp.noder.windows(2) {
        assert!(pair[1].cumulative_flow_lpm >= pair[0].cumulative_flow_lpm);
    }
    assert_eq!(
        resp.total_vannmengde_lpm,
        Some(resp.node(4).unwrap().cumulative_flow_lpm)
    );
}

#[test]
fn balance_cap_reports_convergence_error() {
    let options = CalculateOptions {
        balance: BalanceConfig {
            max_iterations: 1,
            ..BalanceConfig::default()
        },
        ..CalculateOptions::default()
    };
    let resp = calculate_file(&demo("03_branch_line.json"), &options);
    assert!(!resp.success);
    assert_eq!(resp.error_type, Some(ErrorKind::ConvergenceError));
    assert!(resp.error.unwrap().contains("node 2"));
}

#[test]
fn missing_file_is_a_request_error() {
    let resp = calculate_file(&demo("does_not_exist.json"), &CalculateOptions::default());
    assert!(!resp.success);
    assert_eq!(resp.error_type, Some(ErrorKind::RequestError));
    assert!(resp.error.unwrap().contains("does_not_exist.json"));
}
