use crate::{
    Ciphertext, DEFAULT_ITERATIONS, EngineParameters,
    tests::{fresh_error, new_engine},
};

// Plaintext units; well above the noise floor of the default parameters.
const FLOOR: f64 = 1e-3;

#[test]
fn inverse_converges_on_unit_interval() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 30);
    [1.0, 1.1, 1.3, 1.5, 1.7, 1.9].iter().for_each(|&m| {
        let ct: Ciphertext = engine.encrypt(m, &mut source).unwrap();
        let y: Ciphertext = engine.inverse(&ct, 8, &mut source).unwrap();
        let have: f64 = engine.decrypt(&y).unwrap();
        assert!((have - 1.0 / m).abs() <= FLOOR, "1/{} ~ {}", m, have);
        assert!(engine.is_canonical(&y).unwrap());
    });
}

#[test]
fn inverse_error_decreases_with_iterations() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 31);
    [1.2, 1.6, 1.8].iter().for_each(|&m| {
        let ct: Ciphertext = engine.encrypt(m, &mut source).unwrap();
        let errors: Vec<f64> = (0..=7)
            .map(|n| {
                let y: Ciphertext = engine.inverse(&ct, n, &mut source).unwrap();
                (engine.decrypt(&y).unwrap() - 1.0 / m).abs()
            })
            .collect();
        errors.windows(2).for_each(|w| {
            assert!(w[1] <= w[0] + FLOOR, "m={} errors={:?}", m, errors);
        });
        assert!(errors[7] <= FLOOR, "m={} errors={:?}", m, errors);
        assert!(errors[7] < errors[0]);
    });
}

#[test]
fn zero_iterations_returns_initial_guess() {
    let params: EngineParameters = EngineParameters::default();
    let (engine, mut source) = new_engine(params, 32);
    let ct: Ciphertext = engine.encrypt(1.5, &mut source).unwrap();
    let y: Ciphertext = engine.inverse(&ct, 0, &mut source).unwrap();
    assert!((engine.decrypt(&y).unwrap() - 1.0).abs() <= fresh_error(&params));
}

#[test]
fn divide() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 33);
    [(3.0, 1.5), (1.0, 1.25), (-7.0, 1.75), (10.0, 1.1)]
        .iter()
        .for_each(|&(m1, m2)| {
            let c1: Ciphertext = engine.encrypt(m1, &mut source).unwrap();
            let c2: Ciphertext = engine.encrypt(m2, &mut source).unwrap();
            let q: Ciphertext = engine.divide(&c1, &c2, 8, &mut source).unwrap();
            let have: f64 = engine.decrypt(&q).unwrap();
            let tol: f64 = FLOOR * (1.0 + m1.abs());
            assert!((have - m1 / m2).abs() <= tol, "{} / {} ~ {}", m1, m2, have);
        });
}

#[test]
fn default_iterations_suffice_near_one() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 34);
    let ct: Ciphertext = engine.encrypt(1.25, &mut source).unwrap();
    let y: Ciphertext = engine.inverse(&ct, DEFAULT_ITERATIONS, &mut source).unwrap();
    assert!((engine.decrypt(&y).unwrap() - 0.8).abs() <= FLOOR);
}

#[test]
fn trace_reports_convergence() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 35);
    let ct: Ciphertext = engine.encrypt(1.5, &mut source).unwrap();
    let (y, trace) = engine.inverse_traced(&ct, 7, &mut source).unwrap();
    assert_eq!(trace.iterates().len(), 8);
    assert!((trace.iterates()[0] - 1.0).abs() <= 1e-3);
    assert_eq!(trace.last(), engine.decrypt(&y).unwrap());
    assert!(trace.is_settled(FLOOR));
    assert!(trace.within(0.0, 1.0 + FLOOR));
}

#[test]
fn trace_flags_divergence() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 36);
    let ct: Ciphertext = engine.encrypt(3.0, &mut source).unwrap();
    // y: 1, -1, -5, -85 for m = 3.
    let (_, trace) = engine.inverse_traced(&ct, 3, &mut source).unwrap();
    assert!(!trace.within(0.0, 1.0 + FLOOR));
    assert!(!trace.is_settled(FLOOR));
    assert!((trace.last() + 85.0).abs() < 0.5);
}

#[test]
fn empty_trace() {
    let (engine, mut source) = new_engine(EngineParameters::default(), 37);
    let ct: Ciphertext = engine.encrypt(1.5, &mut source).unwrap();
    let (_, trace) = engine.inverse_traced(&ct, 0, &mut source).unwrap();
    assert_eq!(trace.iterates().len(), 1);
    assert_eq!(trace.last_step(), None);
    assert!(!trace.is_settled(1.0));
}
