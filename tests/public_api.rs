use textscore::{
    bleu, bleu_conf, cer, evaluate, measures, mer, wer, wer_conf, BleuConfigBuilder,
    ComputationError, ErrorCounts, Pipeline, Smoothing, Transform,
};

pub trait CloseEnough {
    fn are_close(&self, other: &Self, eps: f64) -> bool;
}

impl CloseEnough for f64 {
    fn are_close(&self, other: &Self, eps: f64) -> bool {
        f64::abs(self - other) < eps
    }
}

// (reference, candidate, wer, mer), transcriptions with speech recognition errors.
const TRANSCRIPTIONS: [(&str, &str, f64, f64); 4] = [
    (
        "I'd like a cup of coffee, please.",
        "I would like a cup of toffee please",
        1.0 / 8.0,
        1.0 / 8.0,
    ),
    (
        "The meeting starts at nine o'clock.",
        "the meeting starts at nine",
        1.0 / 6.0,
        1.0 / 6.0,
    ),
    ("We can't go there", "we cannot go there", 2.0 / 5.0, 2.0 / 5.0),
    ("yes", "yes yes yes", 2.0, 2.0 / 3.0),
];

#[test]
fn comparison_to_known_rates() {
    for (reference, candidate, expected_wer, expected_mer) in TRANSCRIPTIONS {
        let actual_wer = wer(reference, candidate).unwrap();
        let actual_mer = mer(reference, candidate).unwrap();
        dbg!(reference, candidate, actual_wer, actual_mer);
        assert!(actual_wer.are_close(&expected_wer, 1e-9));
        assert!(actual_mer.are_close(&expected_mer, 1e-9));
    }
}

#[test]
fn scenario_identical_sentences() {
    let scores = evaluate("the cat sat on the mat", "the cat sat on the mat").unwrap();
    assert!(scores.bleu.are_close(&1.0, 1e-9));
    assert_eq!(scores.wer, 0.0);
    assert_eq!(scores.cer, 0.0);
    assert_eq!(scores.mer, 0.0);
}

#[test]
fn scenario_unrelated_sentences() {
    let scores = evaluate("the cat sat on the mat", "a dog ran in the park").unwrap();
    assert!(scores.wer > 0.6);
    assert!(scores.cer > 0.6);
    // 12 character edits over "thecatsatonthemat"
    assert!(scores.cer.are_close(&(12.0 / 17.0), 1e-9));
    assert!(scores.bleu > 0.0);
    assert!(scores.bleu < 0.25);
}

#[test]
fn empty_reference_is_an_error() {
    for reference in ["", " ", "...", "\n\t"] {
        assert!(matches!(
            wer(reference, "anything"),
            Err(ComputationError::EmptyReference(_))
        ));
        assert!(matches!(
            cer(reference, "anything"),
            Err(ComputationError::EmptyReference(_))
        ));
        assert!(matches!(
            mer(reference, "anything"),
            Err(ComputationError::EmptyReference(_))
        ));
    }
}

#[test]
fn empty_candidate_deletes_everything() {
    let reference = "Every word of this reference is deleted.";
    assert_eq!(wer(reference, ""), Ok(1.0));
    assert_eq!(cer(reference, ""), Ok(1.0));
    assert_eq!(mer(reference, ""), Ok(1.0));
    let counts = measures(reference, "", &Pipeline::default()).unwrap().counts;
    assert_eq!(
        counts,
        ErrorCounts {
            hits: 0,
            substitutions: 0,
            deletions: 7,
            insertions: 0
        }
    );
}

#[test]
fn custom_pipeline_keeps_case() {
    let pipeline: Pipeline = [Transform::Strip, Transform::RemovePunctuation]
        .into_iter()
        .collect();
    assert_eq!(wer_conf("Hello there!", "hello there", &pipeline), Ok(0.5));
}

#[test]
fn bleu_with_custom_config() {
    let reference = "the quick brown fox jumps over the lazy dog";
    let candidate = "the quick brown fox jumps over the dog";
    let config = BleuConfigBuilder::default()
        .weights([0.5, 0.5, 0.0, 0.0])
        .smoothing(Smoothing::NoSmoothing)
        .build();
    let actual = bleu_conf(reference, candidate, &config).unwrap();
    assert!(actual.are_close(&0.8170333703998377, 1e-9));
    assert!(bleu(reference, candidate).unwrap() > 0.7);

    let config = BleuConfigBuilder::default().weights(vec![1.0; 3]).build();
    assert!(matches!(
        bleu_conf(reference, candidate, &config),
        Err(ComputationError::WeightsLength(_))
    ));

    let config = BleuConfigBuilder::default()
        .weights([f64::NAN, 0.5, 0.25, 0.25])
        .build();
    assert!(matches!(
        bleu_conf(reference, candidate, &config),
        Err(ComputationError::WeightValue(_))
    ));
}
