use crate::resources::{ResourceList, ResourceQuantity};

fn samples() -> Vec<ResourceQuantity> {
    let mut samples = Vec::new();
    for milli_cpu in [0.0, 9.9, 10.0, 250.0, 4000.5] {
        for memory in [0.0, 1.0, 512.0 * 1024.0 * 1024.0] {
            for accelerator in [0.0, 0.5, 1.0, 8.0] {
                samples.push(ResourceQuantity::new(milli_cpu, memory, accelerator));
            }
        }
    }
    samples
}

#[test]
fn test_clone_equals_source() {
    for a in samples() {
        let mut clone = a;
        assert_eq!(clone, a);
        clone.add(&ResourceQuantity::new(1.0, 1.0, 1.0));
        assert_ne!(clone, a);
    }
}

#[test]
fn test_adding_empty_keeps_value() {
    assert!(ResourceQuantity::empty().is_empty());
    for a in samples() {
        let mut b = a;
        b.add(&ResourceQuantity::empty());
        assert_eq!(b, a);

        let mut c = ResourceQuantity::empty();
        c.add(&a);
        assert_eq!(c, a);
    }
}

#[test]
fn test_less_is_irreflexive() {
    for a in samples() {
        assert!(!a.less(&a));
        assert!(a.less_equal(&a));
    }
}

#[test]
fn test_sub_of_smaller_quantity() {
    for a in samples() {
        for b in samples() {
            if a.less(&b) {
                assert!(b.can_subtract(&a));
                let mut result = b;
                result.sub(&a);
                assert_eq!(
                    result,
                    ResourceQuantity::new(
                        b.milli_cpu - a.milli_cpu,
                        b.memory - a.memory,
                        b.accelerator - a.accelerator
                    )
                );
            }
        }
    }
}

#[test]
fn test_sub_fails_exactly_when_guard_fails() {
    for a in samples() {
        for b in samples() {
            let mut result = b;
            let outcome = std::panic::catch_unwind(move || {
                result.sub(&a);
            });
            assert_eq!(outcome.is_ok(), !b.less(&a), "{b} - {a}");
        }
    }
}

#[test]
fn test_accumulated_rounding_stays_within_tolerance() {
    let step = ResourceQuantity::new(0.1, 0.1, 0.1);
    let mut total = ResourceQuantity::empty();
    for _ in 0..1000 {
        total.add(&step);
    }
    let expected = ResourceQuantity::new(100.0, 100.0, 100.0);
    assert_ne!(total, expected);
    assert!(total.less_equal(&expected));
    assert!(expected.less_equal(&total));
}

#[test]
fn test_aggregate_then_release() {
    let node: ResourceQuantity = "cpu=4,memory=8Gi,accelerator-count=2".parse().unwrap();
    let pods: Vec<ResourceList> = vec![
        "cpu=500m,memory=1Gi".parse().unwrap(),
        "cpu=1500m,memory=2Gi,accelerator-count=1".parse().unwrap(),
        "cpu=1,memory=512Mi,nvidia.com/gpu=1".parse().unwrap(),
    ];

    let mut free = node;
    for pod in &pods {
        let request = ResourceQuantity::from_resource_list(pod);
        assert!(request.less_equal(&free));
        free.sub(&request);
    }
    assert_eq!(
        free,
        ResourceQuantity::new(1000.0, 4.5 * 1024.0 * 1024.0 * 1024.0, 1.0)
    );
    assert!(!free.is_empty());

    for pod in &pods {
        free.add(&ResourceQuantity::from_resource_list(pod));
    }
    assert_eq!(free, node);
}
