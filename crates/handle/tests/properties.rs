//! Property-based tests for the ownership contract

mod common;

use common::recorder;
use ownhandle::{OwningHandle, RawResource};
use proptest::prelude::*;

proptest! {
    #[test]
    fn drop_cleans_up_exactly_once(fd in 0i32..=i32::MAX) {
        let (calls, cleanup) = recorder::<i32>();
        drop(OwningHandle::new(fd, cleanup));
        prop_assert_eq!(calls.borrow().clone(), vec![fd]);
    }

    #[test]
    fn release_suppresses_cleanup(id in 1u64..) {
        let (calls, cleanup) = recorder::<u64>();
        let mut handle = OwningHandle::new(id, cleanup);
        prop_assert_eq!(handle.release(), id);
        drop(handle);
        prop_assert!(calls.borrow().is_empty());
    }

    #[test]
    fn repeated_release_yields_sentinel(id in 1usize.., extra in 1usize..5) {
        let (calls, cleanup) = recorder::<usize>();
        let mut handle = OwningHandle::new(id, cleanup);
        prop_assert_eq!(handle.release(), id);
        for _ in 0..extra {
            prop_assert_eq!(handle.release(), <usize as RawResource>::null());
        }
        drop(handle);
        prop_assert!(calls.borrow().is_empty());
    }

    #[test]
    fn views_never_change_ownership(fd in 0i32..=i32::MAX, views in 0usize..32) {
        let (calls, cleanup) = recorder::<i32>();
        let handle = OwningHandle::new(fd, cleanup);
        for _ in 0..views {
            prop_assert_eq!(handle.get(), fd);
            prop_assert_eq!(*handle.view(), fd);
            prop_assert!(handle.owns());
        }
        prop_assert!(calls.borrow().is_empty());
        drop(handle);
        prop_assert_eq!(calls.borrow().clone(), vec![fd]);
    }

    #[test]
    fn chained_moves_clean_up_once(fd in 0i32..=i32::MAX, hops in 1usize..8) {
        let (calls, cleanup) = recorder::<i32>();
        let mut current = OwningHandle::new(fd, cleanup);
        for _ in 0..hops {
            let mut next = current.take();
            prop_assert!(!current.owns());
            drop(current);
            prop_assert!(calls.borrow().is_empty());
            current = next.take();
            drop(next);
        }
        drop(current);
        prop_assert_eq!(calls.borrow().clone(), vec![fd]);
    }

    #[test]
    fn reassignment_cleans_each_resource_once(ids in prop::collection::vec(1u32.., 1..10)) {
        let (calls, cleanup) = recorder::<u32>();
        let mut handle = OwningHandle::new(ids[0], cleanup.clone());
        prop_assert!(handle.owns());
        for &id in &ids[1..] {
            handle = OwningHandle::new(id, cleanup.clone());
        }
        prop_assert_eq!(calls.borrow().len(), ids.len() - 1);
        drop(handle);
        prop_assert_eq!(calls.borrow().clone(), ids);
    }

    #[test]
    fn only_the_sentinel_skips_cleanup(fd in i32::MIN..0) {
        let (calls, cleanup) = recorder::<i32>();
        let handle = OwningHandle::new(fd, cleanup);
        prop_assert_eq!(handle.is_null(), fd == -1);
        drop(handle);
        let expected = if fd == -1 { vec![] } else { vec![fd] };
        prop_assert_eq!(calls.borrow().clone(), expected);
    }
}
