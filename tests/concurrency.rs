use std::{collections::HashMap, sync::Arc, thread};

use mathparse::{Evaluator, parse};

#[test]
fn evaluator_is_shared_between_threads() {
    let evaluator: Arc<Evaluator> = Arc::new(parse("t ^ 2 + sin(t * pi)").expect("parses"));

    let handles: Vec<_> = (0..8_u8).map(|i| {
                                    let evaluator = Arc::clone(&evaluator);
                                    thread::spawn(move || {
                                        let t = f64::from(i);
                                        let vars = HashMap::from([("t".to_string(), t)]);
                                        (0..100).map(|_| evaluator.evaluate(Some(&vars), None, None))
                                                .collect::<Vec<_>>()
                                    })
                                })
                                .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().expect("thread panicked");
        let t = f64::from(u8::try_from(i).expect("small index"));
        let expected = t.powf(2.0) + (t * std::f64::consts::PI).sin();

        assert!(results.iter().all(|&value| value == expected),
                "thread {i} saw inconsistent results");
    }
}

#[test]
fn evaluator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Evaluator>();
    assert_send_sync::<mathparse::MathParser>();
}
