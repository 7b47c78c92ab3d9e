//! # Reference Manager Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::msg::Header;
use nalgebra::Vector3;
use ref_lib::{
    loc::Pose,
    ref_mgr::{Params, PathRef, Reference, RefMgr, SharedRefMgr, TrackingRef},
};

/// Number of waypoints in the benchmark path.
const NUM_WAYPOINTS: usize = 10_000;

fn long_path() -> PathRef {
    PathRef {
        header: Header::new("map", 1.0),
        poses: (0..NUM_WAYPOINTS)
            .map(|i| {
                let theta = i as f64 * 0.01;
                Pose::from_yaw(Vector3::new(theta.cos() * 20.0, theta.sin() * 20.0, 2.0), theta)
            })
            .collect(),
    }
}

fn ref_mgr_benchmark(c: &mut Criterion) {
    // ---- Queries and installs on a long path ----

    // Zero hold so a waypoint completes on the query after it is reached
    let params = Params {
        waypoint_radius_m: 0.5,
        waypoint_yaw_accuracy_rad: 0.1,
        waypoint_hold_duration_s: 0.0,
        fallback_to_pose: true,
    };

    let path = long_path();
    let away = Pose::from_yaw(Vector3::new(100.0, 100.0, 0.0), 0.0);

    // Cyclic query while the vehicle is away from the waypoint
    let mut ref_mgr = RefMgr::new(params.clone());
    ref_mgr.install(Reference::Path(path.clone()), 1.0).unwrap();

    let mut t_s = 2.0;
    c.bench_function("RefMgr::get_reference::path", |b| {
        b.iter(|| {
            t_s += 0.1;
            ref_mgr.get_reference(black_box(t_s), black_box(&away)).unwrap()
        })
    });

    // The same query through the lock
    let shared = SharedRefMgr::new(RefMgr::new(params.clone()));
    shared.install(Reference::Path(path.clone()), 1.0).unwrap();

    let mut t_s = 2.0;
    c.bench_function("SharedRefMgr::get_reference::path", |b| {
        b.iter(|| {
            t_s += 0.1;
            shared.get_reference(black_box(t_s), black_box(&away)).unwrap()
        })
    });

    // Vehicle sat on each waypoint in turn, so the path advances every other query
    let mut ref_mgr = RefMgr::new(params.clone());
    ref_mgr.install(Reference::Path(path.clone()), 1.0).unwrap();

    let mut t_s = 2.0;
    let mut at = away;
    c.bench_function("RefMgr::get_reference::path_advancing", |b| {
        b.iter(|| {
            t_s += 0.1;

            // Start again once the fallback pose has taken over
            if ref_mgr.get_reference_used() != TrackingRef::Path {
                ref_mgr.install(Reference::Path(path.clone()), t_s).unwrap();
            }

            let (target, _) = ref_mgr.get_reference(black_box(t_s), black_box(&at)).unwrap();
            if let Some(target) = target {
                at = Pose::from_yaw(
                    Vector3::new(target.position.x, target.position.y, target.position.z),
                    target.yaw_rad,
                );
            }
        })
    });

    // Replacing the path wholesale
    let mut ref_mgr = RefMgr::new(params);
    c.bench_function("RefMgr::install::path", |b| {
        b.iter(|| {
            ref_mgr
                .install(Reference::Path(black_box(path.clone())), 1.0)
                .unwrap()
        })
    });
}

criterion_group!(benches, ref_mgr_benchmark);
criterion_main!(benches);
