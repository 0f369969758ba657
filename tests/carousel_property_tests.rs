use folio::core::carousel::{CarouselController, SlideSet};
use folio::core::dom::{Dom, Selector};
use folio::core::memory::MemoryDom;
use folio::core::sample::{portfolio_document, SAMPLE_PROJECTS};
use proptest::prelude::*;

/// A document with `n` identical slides and a mounted carousel.
fn carousel(n: usize) -> (MemoryDom, CarouselController) {
    let projects = vec![SAMPLE_PROJECTS[0]; n];
    let mut dom = portfolio_document(&projects);
    let controller = CarouselController::mount(&mut dom, 50.0).expect("grid with slides");
    (dom, controller)
}

/// Positions bearing `active` among every element with `class`.
fn active_positions(dom: &MemoryDom, class: &str) -> Vec<usize> {
    dom.find_all(&Selector::class(class))
        .into_iter()
        .enumerate()
        .filter(|&(_, el)| dom.has_class(el, "active"))
        .map(|(i, _)| i)
        .collect()
}

fn assert_single_active(dom: &MemoryDom, index: usize) {
    for class in ["portfolio-item", "portfolio-indicator", "portfolio-label"] {
        assert_eq!(active_positions(dom, class), vec![index], "active {class}");
    }
}

proptest! {
    #[test]
    fn wrap_is_euclidean(n in 1usize..64, i in any::<i64>()) {
        let set = SlideSet::new(n).unwrap();
        let expected = ((i % n as i64) + n as i64) % n as i64;
        prop_assert_eq!(set.wrap(i) as i64, expected);
    }

    #[test]
    fn go_to_activates_exactly_one_triple(n in 1usize..10, i in -1_000i64..1_000) {
        let (mut dom, mut c) = carousel(n);
        prop_assert!(c.go_to(&mut dom, i));
        let expected = i.rem_euclid(n as i64) as usize;
        prop_assert_eq!(c.current(), expected);
        assert_single_active(&dom, expected);
    }

    #[test]
    fn next_and_prev_undo_each_other(n in 1usize..10, start in 0i64..10, forward_first in any::<bool>()) {
        let (mut dom, mut c) = carousel(n);
        c.go_to(&mut dom, start);
        let before = c.current();
        if forward_first {
            c.next(&mut dom);
            c.prev(&mut dom);
        } else {
            c.prev(&mut dom);
            c.next(&mut dom);
        }
        prop_assert_eq!(c.current(), before);
        assert_single_active(&dom, before);
    }

    #[test]
    fn go_to_is_ignored_while_guarded(n in 2usize..10, i in any::<i64>()) {
        let (mut dom, mut c) = carousel(n);
        prop_assert!(c.slide_set_mut().begin_transition());
        prop_assert!(!c.go_to(&mut dom, i));
        prop_assert_eq!(c.current(), 0);
        assert_single_active(&dom, 0);
        c.slide_set_mut().end_transition();
        prop_assert!(c.go_to(&mut dom, i));
    }
}

#[test]
fn a_single_slide_always_stays_put() {
    let (mut dom, mut c) = carousel(1);
    c.next(&mut dom);
    c.prev(&mut dom);
    c.go_to(&mut dom, i64::MIN);
    assert_eq!(c.current(), 0);
    assert_single_active(&dom, 0);
}
