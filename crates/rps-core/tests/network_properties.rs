use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rps_core::game::counter_move;
use rps_core::model::{Move, Round, Sample};
use rps_core::network::{
    DirectNetwork, Evidence, InferenceNetwork, InvertedNetwork, NetworkVariant, OpponentModel,
};
use rps_core::prob::{ConditionalTable, Distribution, TOLERANCE};

fn random_history(seed: u64, len: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rounds: Vec<Round> = (0..len)
        .map(|_| Round::new(Move::random(&mut rng), Move::random(&mut rng)))
        .collect();
    Sample::from_rounds(&rounds)
}

/// Computer that mostly repeats whatever beat the human last round.
fn biased_history(seed: u64, len: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rounds = vec![Round::new(Move::Rock, Move::Rock)];
    for _ in 1..len {
        let previous = rounds[rounds.len() - 1];
        let computer = if rng.gen_bool(0.8) {
            previous.human.counter()
        } else {
            Move::random(&mut rng)
        };
        rounds.push(Round::new(Move::random(&mut rng), computer));
    }
    Sample::from_rounds(&rounds)
}

fn all_evidence() -> impl Iterator<Item = Evidence> {
    Move::ALL
        .into_iter()
        .flat_map(|human| Move::ALL.into_iter().map(move |computer| Evidence::new(human, computer)))
}

fn assert_valid(dist: &Distribution) {
    for (_, p) in dist.iter() {
        assert!(p >= 0.0, "negative probability in {dist:?}");
    }
    assert!((dist.total() - 1.0).abs() <= TOLERANCE, "{dist:?} does not sum to 1");
}

#[test]
fn fitted_parameters_are_valid_distributions() {
    for seed in 0..8 {
        let samples = random_history(seed, 40);

        let mut direct = DirectNetwork::new();
        direct.fit(&samples);
        for (_, dist) in direct.prediction_table().iter() {
            assert_valid(dist);
        }

        let mut inverted = InvertedNetwork::new();
        inverted.fit(&samples);
        assert_valid(inverted.label_prior());
        for (_, dist) in inverted.human_given_label().iter() {
            assert_valid(dist);
        }
        for (_, dist) in inverted.computer_given_label().iter() {
            assert_valid(dist);
        }
    }
}

#[test]
fn fit_is_deterministic_and_idempotent() {
    let samples = biased_history(11, 60);
    for variant in [NetworkVariant::Direct, NetworkVariant::Inverted] {
        let mut first = InferenceNetwork::new(variant);
        let mut second = InferenceNetwork::new(variant);
        first.fit(&samples);
        second.fit(&samples);
        second.fit(&samples);
        assert_eq!(first, second);
    }
}

#[test]
fn unexercised_parent_combinations_stay_uniform() {
    let samples: Vec<Sample> = random_history(3, 50)
        .into_iter()
        .filter(|s| s.previous_human != Move::Scissors)
        .collect();
    let mut net = DirectNetwork::new();
    net.fit(&samples);
    for computer in Move::ALL {
        assert_eq!(
            net.prediction_table().get([Move::Scissors, computer]),
            &Distribution::uniform()
        );
    }
}

#[test]
fn direct_scenario_predicts_the_only_observed_outcome() {
    let samples = [
        Sample::new(Move::Rock, Move::Paper, Move::Scissors),
        Sample::new(Move::Paper, Move::Scissors, Move::Rock),
    ];
    let mut net = InferenceNetwork::new(NetworkVariant::Direct);
    net.fit(&samples);
    for _ in 0..3 {
        assert_eq!(net.predict(Evidence::new(Move::Rock, Move::Paper)), Move::Scissors);
    }
}

/// Naive Bayes computed straight from sample counts, without the table types.
fn brute_force_posterior(samples: &[Sample], evidence: Evidence) -> Option<[f64; 3]> {
    let total = samples.len() as f64;
    let mut scores = [0.0; 3];
    for label in Move::ALL {
        let with_label: Vec<&Sample> = samples.iter().filter(|s| s.next_computer == label).collect();
        let n = with_label.len() as f64;
        let (prior, p_human, p_computer) = if n == 0.0 {
            (0.0, 1.0 / 3.0, 1.0 / 3.0)
        } else {
            let humans = with_label.iter().filter(|s| s.previous_human == evidence.human).count();
            let computers = with_label
                .iter()
                .filter(|s| s.previous_computer == evidence.computer)
                .count();
            (n / total, humans as f64 / n, computers as f64 / n)
        };
        scores[label.index()] = prior * p_human * p_computer;
    }
    let sum: f64 = scores.iter().sum();
    (sum > 0.0).then(|| scores.map(|s| s / sum))
}

#[test]
fn inverted_posterior_matches_brute_force_bayes() {
    for seed in 20..26 {
        let samples = biased_history(seed, 80);
        let mut net = InvertedNetwork::new();
        net.fit(&samples);

        for evidence in all_evidence() {
            let posterior = net.predict_distribution(evidence);
            assert_valid(posterior.target());

            let Some(expected) = brute_force_posterior(&samples, evidence) else {
                assert_eq!(posterior.target(), net.label_prior());
                continue;
            };
            for label in Move::ALL {
                let got = posterior.target().probability_of(label);
                assert!(
                    (got - expected[label.index()]).abs() < 1e-12,
                    "seed {seed} evidence {evidence:?} label {label}: {got} vs {}",
                    expected[label.index()]
                );
            }
            let expected_argmax = Distribution::from_weights(expected)
                .expect("brute force posterior is normalized")
                .argmax();
            assert_eq!(posterior.predicted(), expected_argmax);
        }
    }
}

#[test]
fn inverted_posterior_is_valid_for_every_evidence_pair_on_sparse_data() {
    let samples = [
        Sample::new(Move::Rock, Move::Rock, Move::Rock),
        Sample::new(Move::Rock, Move::Rock, Move::Paper),
    ];
    let mut net = InvertedNetwork::new();
    net.fit(&samples);
    for evidence in all_evidence() {
        assert_valid(net.predict_distribution(evidence).target());
    }
}

#[test]
fn explicit_prior_rows_seed_the_direct_network() {
    let rows = Move::ALL.into_iter().flat_map(|human| {
        Move::ALL.into_iter().flat_map(move |computer| {
            Move::ALL.into_iter().map(move |child| {
                let p = if child == Move::Paper { 0.5 } else { 0.25 };
                (vec![human, computer], child, p)
            })
        })
    });
    let prior = ConditionalTable::<2>::from_rows(rows).expect("rows sum to one");
    let mut net = DirectNetwork::with_prior(prior);
    net.fit(&[Sample::new(Move::Rock, Move::Rock, Move::Scissors)]);

    assert_eq!(net.predict(Evidence::new(Move::Rock, Move::Rock)), Move::Scissors);
    assert_eq!(net.predict(Evidence::new(Move::Paper, Move::Rock)), Move::Paper);
}

#[test]
fn recommendation_over_repeated_evidence_always_returns_a_move() {
    let samples = biased_history(5, 30);
    for variant in [NetworkVariant::Direct, NetworkVariant::Inverted] {
        let mut net = InferenceNetwork::new(variant);
        net.fit(&samples);
        let evidence = Evidence::new(Move::Paper, Move::Paper);
        let first = counter_move(net.predict(evidence));
        for _ in 0..10 {
            let advice = counter_move(net.predict(evidence));
            assert!(Move::ALL.contains(&advice));
            assert_eq!(advice, first);
        }
    }
}
