//! File-backed round trips through the public store facade.

use std::fs;

use credit_risk::workflows::risk::{
    Applicant, EmploymentCategory, FileRecordStore, InvalidRowPolicy, LoadError, Portfolio,
    RecordStore, StoreError,
};

fn applicants() -> Portfolio {
    vec![
        Applicant::new(
            "Ravi",
            42,
            85_000.0,
            EmploymentCategory::Salaried,
            1_500_000.0,
            10,
            0.085,
            "SBI",
        ),
        Applicant::new(
            "Meera",
            29,
            40_000.0,
            EmploymentCategory::SelfEmployed,
            600_000.0,
            4,
            0.11,
            "ICICI",
        ),
        Applicant::new(
            "Kabir",
            19,
            12_000.0,
            EmploymentCategory::Student,
            300_000.0,
            7,
            0.095,
            "Canara",
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn save_then_load_round_trips_the_portfolio() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileRecordStore::new(dir.path().join("credit_profiles.txt"));
    let portfolio = applicants();

    store.save(&portfolio).expect("save succeeds");
    let report = store.load(InvalidRowPolicy::Skip).expect("load succeeds");

    assert_eq!(report.portfolio, portfolio);
    assert!(!dir.path().join("credit_profiles.txt.tmp").exists());
}

#[test]
fn saved_file_has_one_headerless_line_per_applicant() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("credit_profiles.txt");
    let store = FileRecordStore::new(&path);

    store.save(&applicants()).expect("save succeeds");
    let contents = fs::read_to_string(&path).expect("file readable");

    assert_eq!(
        contents,
        "Ravi,42,85000,SALARIED,1500000,10,0.085,SBI\n\
Meera,29,40000,SELF_EMPLOYED,600000,4,0.11,ICICI\n\
Kabir,19,12000,STUDENT,300000,7,0.095,Canara\n"
    );
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileRecordStore::new(dir.path().join("credit_profiles.txt"));

    store.save(&applicants()).expect("first save");
    store.save(&Portfolio::new()).expect("second save");

    let report = store.load(InvalidRowPolicy::Skip).expect("load succeeds");
    assert!(report.portfolio.is_empty());
}

#[test]
fn hand_edited_file_skips_bad_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("credit_profiles.txt");
    fs::write(
        &path,
        "Ravi,42,85000.0,SALARIED,1500000.0,10,0.085,SBI\r\n\
Broken,42,85000.0,SALARIED\r\n\
Ana,30,50000.0,RETIRED,100000.0,2,0.07,Axis\r\n\
Kabir,19,12000.0,STUDENT,300000.0,7,0.095,Canara\r\n",
    )
    .expect("fixture written");

    let report = FileRecordStore::new(&path)
        .load(InvalidRowPolicy::Skip)
        .expect("load succeeds");

    assert_eq!(report.portfolio.len(), 2);
    assert_eq!(report.portfolio.applicants()[1].bank_name(), "Canara");
    assert_eq!(report.malformed_rows, 1);
    assert_eq!(report.rejected_rows.len(), 1);
    assert_eq!(report.rejected_rows[0].line, 3);
}

#[test]
fn abort_policy_surfaces_the_offending_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("credit_profiles.txt");
    fs::write(&path, "Ana,30,50000,RETIRED,100000,2,0.07,Axis\n").expect("fixture written");

    let error = FileRecordStore::new(&path)
        .load(InvalidRowPolicy::Abort)
        .expect_err("load aborts");

    match error {
        StoreError::Load(LoadError::InvalidRow { line, loaded, .. }) => {
            assert_eq!(line, 1);
            assert!(loaded.is_empty());
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn save_into_missing_directory_fails_without_creating_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("credit_profiles.txt");

    let error = FileRecordStore::new(&path)
        .save(&applicants())
        .expect_err("save fails");

    assert!(matches!(error, StoreError::Io { .. }));
    assert!(!path.exists());
}
