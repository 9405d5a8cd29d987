//! End-to-end scenarios: four-vector tracks written into an in-memory table.

use proptest::prelude::*;

use tuma_core::{FieldProducer, RowStatus, TupleError, TupleMaker};
use tuma_predef::{
    Candidate, CandidateOptions, CandidateTrack, LorentzColumns, LorentzVector,
    LorentzVectorTrack, RAD_TO_DEG,
};
use tuma_table::Table;

fn table() -> Table {
    Table::new("T", "Tuple")
}

#[test]
fn create_without_table_fails() {
    let err = TupleMaker::<Table>::new(None).unwrap_err();
    assert!(matches!(err, TupleError::InvalidArgument { .. }));
}

#[test]
fn create_with_selections() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();
    tmk.add_producer::<LorentzVectorTrack>("p2", LorentzColumns::E)
        .unwrap();
    tmk.add_producer::<LorentzVectorTrack>("p3", LorentzColumns::COS_THETA)
        .unwrap();

    let table = tmk.sink();
    assert_eq!(table.num_columns(), 14);
    assert!(table.column("fp2E").is_some());
    assert!(table.column("fp2M").is_none());
    assert!(table.column("fp3CosTheta").is_some());
}

#[test]
fn unfilled_track_is_fatal() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();

    let err = tmk.check_and_fill().unwrap_err();
    assert_eq!(err.missing_producers(), Some(&["p1".to_string()][..]));
    assert_eq!(tmk.sink().num_rows(), 0);
}

#[test]
fn unfilled_track_non_fatal_returns_false() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();
    tmk.set_errors_fatal(false);

    assert!(!tmk.check_and_fill().unwrap());
    assert!(!tmk[p1].is_ready());
    assert_eq!(tmk.into_sink().num_rows(), 0);
}

#[test]
fn filled_track_commits_one_row() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();

    tmk[p1].fill(&LorentzVector::new(1.0, 2.0, 3.0, 4.0));
    tmk.set_errors_fatal(true);

    assert!(tmk.check_and_fill().unwrap());
    assert_eq!(tmk.sink().num_rows(), 1);
}

#[test]
fn repeated_commit_needs_new_fill() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();
    tmk[p1].use_angles_deg(true);

    tmk[p1].fill(&LorentzVector::new(1.0, 2.0, 3.0, 4.0));
    assert!(tmk.check_and_fill().is_ok());
    assert!(tmk.check_and_fill().is_err());

    tmk[p1].clear();
    assert!(tmk.check_and_fill().is_ok());
    assert_eq!(tmk.sink().num_rows(), 2);
}

#[test]
fn two_tracks_with_final_cleared_row() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();
    let p2 = tmk.add_default_producer::<LorentzVectorTrack>("p2").unwrap();

    let mut v1 = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
    let mut v2 = v1;
    for i in 0..3 {
        tmk.reset();
        v1.set_e(100.0 + f64::from(i));
        v2.set_e(200.0 + f64::from(i));
        tmk[p1].fill(&v1);
        tmk[p2].fill(&v2);
        assert!(tmk.check_and_fill().unwrap());
    }

    tmk.reset();
    v1.set_e(9999.0);
    tmk[p1].fill(&v1);
    tmk[p2].clear();
    assert!(tmk.check_and_fill().unwrap());

    let table = tmk.into_sink();
    assert_eq!(table.num_rows(), 4);
    for i in 0..3 {
        assert_eq!(table.get_f64("fp1E", i), Some(100.0 + i as f64));
        assert_eq!(table.get_f64("fp2E", i), Some(200.0 + i as f64));
    }
    assert_eq!(table.get_f64("fp1E", 3), Some(9999.0));

    let last = table.row(3).unwrap();
    let p2_values: Vec<_> = last
        .values
        .iter()
        .filter(|(name, _)| name.starts_with("fp2"))
        .collect();
    assert_eq!(p2_values.len(), 12);
    assert!(p2_values.iter().all(|(_, value)| value.is_neutral()));
}

#[test]
fn angle_units_toggle_between_rows() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();
    let p2 = tmk.add_default_producer::<LorentzVectorTrack>("p2").unwrap();
    let vector = LorentzVector::new(1.0, 2.0, 3.0, 4.0);

    tmk[p1].use_angles_deg(true);
    tmk[p2].use_angles_deg(true);
    tmk[p1].fill(&vector);
    tmk[p2].fill(&vector);
    tmk.check_and_fill().unwrap();

    tmk[p1].use_angles_deg(false);
    tmk[p1].fill(&vector);
    tmk[p2].fill(&vector);
    tmk.check_and_fill().unwrap();

    let table = tmk.into_sink();
    assert_eq!(table.get_f64("fp1Theta", 0), table.get_f64("fp2Theta", 0));

    let deg = table.get_f64("fp1Theta", 0).unwrap();
    let rad = table.get_f64("fp1Theta", 1).unwrap();
    assert!((deg / rad - RAD_TO_DEG).abs() < 1e-9);
    assert!((deg / rad - 57.2958).abs() < 1e-4);

    let deg_phi = table.get_f64("fp1Phi", 0).unwrap();
    let rad_phi = table.get_f64("fp1Phi", 1).unwrap();
    assert!((deg_phi / rad_phi - RAD_TO_DEG).abs() < 1e-9);

    for column in ["E", "M", "P", "CosTheta", "Y", "Pt", "Px", "Py", "Pz", "Beta"] {
        let name = format!("fp1{column}");
        assert_eq!(table.get_f64(&name, 0), table.get_f64(&name, 1), "{name}");
    }
}

#[test]
fn toggling_units_keeps_readiness() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let p1 = tmk.add_default_producer::<LorentzVectorTrack>("p1").unwrap();

    tmk[p1].fill(&LorentzVector::new(1.0, 2.0, 3.0, 4.0));
    tmk[p1].use_angles_deg(true);
    assert!(tmk[p1].is_ready());
    assert!(tmk.check_and_fill().unwrap());
}

#[test]
fn colliding_column_names_are_rejected() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    tmk.add_producer::<LorentzVectorTrack>("p", LorentzColumns::COS_THETA)
        .unwrap();

    // "pCos" + "Theta" spells the same column as "p" + "CosTheta".
    let err = tmk
        .add_default_producer::<LorentzVectorTrack>("pCos")
        .unwrap_err();
    assert!(matches!(err, TupleError::DuplicateColumn { ref name } if name == "fpCosTheta"));
    assert_eq!(tmk.len(), 1);
    assert_eq!(tmk.sink().num_columns(), 1);

    let err = tmk
        .add_producer::<CandidateTrack>("p", CandidateOptions::new(LorentzColumns::E))
        .unwrap_err();
    assert!(matches!(err, TupleError::DuplicateProducer { .. }));
}

#[test]
fn candidate_vertex_columns_round_trip() {
    let mut tmk = TupleMaker::new(Some(table())).unwrap();
    let selection = LorentzColumns::E | LorentzColumns::M | LorentzColumns::PHI;
    let c1 = tmk
        .add_producer::<CandidateTrack>("_p1_", CandidateOptions::new(selection).with_vertex(true))
        .unwrap();
    let c2 = tmk
        .add_producer::<CandidateTrack>("_p2_", CandidateOptions::new(selection))
        .unwrap();

    let candidate = Candidate {
        momentum: LorentzVector::new(0.3, -0.1, 1.2, 1.5),
        r: 0.25,
        z: -31.5,
    };
    tmk[c1].use_angles_deg(true);
    tmk[c1].fill(&candidate);
    tmk[c2].fill(&candidate);
    assert_eq!(tmk.check_row().unwrap(), RowStatus::Committed);

    let table = tmk.into_sink();
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec![
            "f_p1_E", "f_p1_M", "f_p1_Phi", "f_p1_R", "f_p1_Z", "f_p2_E", "f_p2_M", "f_p2_Phi"
        ]
    );
    assert_eq!(table.get_f64("f_p1_Z", 0), Some(-31.5));
    assert_eq!(table.get_f64("f_p1_R", 0), Some(0.25));
    assert_eq!(table.get_f64("f_p1_E", 0), Some(1.5));
}

proptest! {
    #[test]
    fn committed_energies_read_back_unchanged(
        energies in prop::collection::vec(-1.0e9..1.0e9f64, 1..20)
    ) {
        let mut tmk = TupleMaker::new(Some(table())).unwrap();
        let p1 = tmk
            .add_producer::<LorentzVectorTrack>("p1", LorentzColumns::E)
            .unwrap();

        let mut vector = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
        for &e in &energies {
            vector.set_e(e);
            tmk[p1].fill(&vector);
            prop_assert!(tmk.check_and_fill().unwrap());
        }

        let table = tmk.into_sink();
        prop_assert_eq!(table.num_rows(), energies.len());
        for (row, &e) in energies.iter().enumerate() {
            prop_assert_eq!(table.get_f64("fp1E", row), Some(e));
        }
    }
}
