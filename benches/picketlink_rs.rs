use criterion::{
    BenchmarkId, Criterion, SamplingMode, Throughput, black_box, criterion_group, criterion_main,
};
use once_cell::sync::Lazy;
use picketlink_rs::jose::{
    CompressionAlgorithm, ContentEncryption, JweDecrypter, JweEncrypter, JweHeader,
    KeyManagementAlgorithm,
};
use picketlink_rs::{Cors, CorsDecision, Properties, RequestContext, format_canonical};
use pprof::criterion::{Output, PProfProfiler};
use rand::rngs::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::alloc::{GlobalAlloc, Layout, System};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};

const BENCH_PROPERTIES: &str = "
cors.allowOrigin = https://bench.allowed https://edge.bench.allowed
cors.allowSubdomains = true
cors.supportedMethods = GET, POST, PUT, OPTIONS
cors.supportedHeaders = X-Custom-One, X-Custom-Two, Content-Type
cors.exposedHeaders = X-Expose-One, X-Expose-Two
cors.maxAge = 600
";

static HEAVY_HEADER_LINE: Lazy<&'static str> = Lazy::new(|| {
    let headers = (0..64)
        .map(|idx| format!("x-bench-header-{idx:03}"))
        .collect::<Vec<_>>()
        .join(",");
    Box::leak(headers.into_boxed_str())
});

static RECIPIENT_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation"));

struct CountingAllocator {
    total_bytes: AtomicU64,
    allocations: AtomicU64,
}

impl CountingAllocator {
    const fn new() -> Self {
        Self {
            total_bytes: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
        }
    }

    fn reset(&self) {
        self.total_bytes.store(0, Ordering::Relaxed);
        self.allocations.store(0, Ordering::Relaxed);
    }

    fn snapshot(&self) -> AllocationSnapshot {
        AllocationSnapshot {
            bytes: self.total_bytes.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
        }
    }

    fn record(&self, bytes: usize) {
        self.total_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
        self.allocations.fetch_add(1, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.record(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.record(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let result = unsafe { System.realloc(ptr, layout, new_size) };
        if !result.is_null() {
            self.record(new_size.saturating_sub(layout.size()));
        }
        result
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
    }
}

#[derive(Clone, Copy, Debug)]
struct AllocationSnapshot {
    bytes: u64,
    allocations: u64,
}

#[global_allocator]
static GLOBAL_ALLOCATOR: CountingAllocator = CountingAllocator::new();

fn build_cors() -> Cors {
    Cors::from_properties(&Properties::parse(BENCH_PROPERTIES))
        .expect("valid benchmark configuration")
}

fn build_cors_wildcard() -> Cors {
    let properties = Properties::new()
        .with("cors.supportsCredentials", "false")
        .with("cors.supportedHeaders", "*");
    Cors::from_properties(&properties).expect("valid wildcard configuration")
}

fn build_cors_with_large_origin_list(size: usize) -> Cors {
    let origins = (0..size)
        .map(|idx| format!("https://svc{idx:03}.bench.allowed"))
        .collect::<Vec<_>>()
        .join(" ");
    let properties = Properties::new()
        .with("cors.allowOrigin", origins)
        .with("cors.allowSubdomains", "true");
    Cors::from_properties(&properties).expect("valid large configuration")
}

fn preflight_request<'a>() -> RequestContext<'a> {
    RequestContext {
        method: "OPTIONS",
        scheme: "https",
        host: Some("api.bench.server"),
        origin: Some("https://bench.allowed"),
        access_control_request_method: Some("POST"),
        access_control_request_headers: Some("X-Custom-One, content-type"),
    }
}

fn actual_request<'a>() -> RequestContext<'a> {
    RequestContext {
        method: "GET",
        scheme: "https",
        host: Some("api.bench.server"),
        origin: Some("https://bench.allowed"),
        ..RequestContext::default()
    }
}

fn same_origin_request<'a>() -> RequestContext<'a> {
    RequestContext {
        origin: Some("https://api.bench.server"),
        ..actual_request()
    }
}

fn bench_preflight_processing(c: &mut Criterion) {
    let cors = build_cors();
    let mut group = c.benchmark_group("preflight_processing");

    group.bench_function("accept_allowed_preflight", |b| {
        let request = preflight_request();
        b.iter(|| match cors.check(&request) {
            Ok(CorsDecision::Preflight(result)) => black_box(result),
            other => panic!("unexpected decision: {other:?}"),
        })
    });

    group.bench_function("reject_unsupported_header", |b| {
        let request = RequestContext {
            access_control_request_headers: Some("X-Not-Listed"),
            ..preflight_request()
        };
        b.iter(|| {
            let rejection = cors.check(&request).expect_err("header must be rejected");
            black_box(rejection.status_code())
        })
    });

    let wildcard = build_cors_wildcard();
    group.bench_function("echo_heavy_header_line", |b| {
        let request = RequestContext {
            access_control_request_headers: Some(*HEAVY_HEADER_LINE),
            ..preflight_request()
        };
        b.iter(|| black_box(wildcard.check(&request).expect("evaluation succeeds")))
    });

    group.finish();
}

fn bench_actual_processing(c: &mut Criterion) {
    let cors = build_cors();
    let mut group = c.benchmark_group("actual_processing");

    group.bench_function("accept_allowed_actual", |b| {
        let request = actual_request();
        b.iter(|| match cors.check(&request) {
            Ok(CorsDecision::Actual(result)) => black_box(result),
            other => panic!("unexpected decision: {other:?}"),
        })
    });

    group.bench_function("accept_subdomain_actual", |b| {
        let request = RequestContext {
            origin: Some("https://deep.edge.bench.allowed"),
            ..actual_request()
        };
        b.iter(|| black_box(cors.check(&request).expect("evaluation succeeds")))
    });

    group.bench_function("pass_same_origin", |b| {
        let request = same_origin_request();
        b.iter(|| match cors.check(&request) {
            Ok(CorsDecision::Generic { .. }) => {}
            other => panic!("unexpected decision: {other:?}"),
        })
    });

    group.finish();
}

fn bench_origin_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("origin_scaling");
    group.sampling_mode(SamplingMode::Flat);

    for size in [1usize, 16, 128] {
        let cors = build_cors_with_large_origin_list(size);
        let request = RequestContext {
            origin: Some("https://unknown.svc999.bench.allowed"),
            ..actual_request()
        };
        group.bench_with_input(
            BenchmarkId::new("subdomain_miss", size),
            &request,
            |b, request| b.iter(|| black_box(cors.check(request).is_err())),
        );
    }

    group.finish();
}

fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");

    group.bench_function("parse_properties_text", |b| {
        b.iter(|| black_box(Properties::parse(black_box(BENCH_PROPERTIES))))
    });

    group.bench_function("build_from_properties", |b| {
        let properties = Properties::parse(BENCH_PROPERTIES);
        b.iter(|| black_box(Cors::from_properties(&properties).expect("valid configuration")))
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function("format_canonical_header", |b| {
        b.iter(|| black_box(format_canonical(black_box("x-requested-with"))))
    });

    group.finish();
}

fn bench_jwe(c: &mut Criterion) {
    let encrypter = JweEncrypter::new(RsaPublicKey::from(&*RECIPIENT_KEY));
    let decrypter = JweDecrypter::new(RECIPIENT_KEY.clone());
    let payload = vec![0x5a_u8; 4096];

    let mut group = c.benchmark_group("jwe");
    group.sample_size(30);
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for enc in [
        ContentEncryption::A128CbcHs256,
        ContentEncryption::A256Gcm,
        ContentEncryption::A256CbcPlusHs512,
    ] {
        let header = JweHeader::builder()
            .algorithm(KeyManagementAlgorithm::RsaOaep)
            .encryption(enc)
            .build();
        let compact = encrypter.encrypt(&header, &payload).expect("encrypt");

        group.bench_with_input(BenchmarkId::new("encrypt", enc), &header, |b, header| {
            b.iter(|| black_box(encrypter.encrypt(header, &payload).expect("encrypt")))
        });
        group.bench_with_input(BenchmarkId::new("decrypt", enc), &compact, |b, compact| {
            b.iter(|| black_box(decrypter.decrypt(compact).expect("decrypt")))
        });
    }

    let deflated = JweHeader::builder()
        .algorithm(KeyManagementAlgorithm::RsaOaep256)
        .encryption(ContentEncryption::A128Gcm)
        .compression(CompressionAlgorithm::Deflate)
        .build();
    group.bench_function("encrypt_deflated", |b| {
        b.iter(|| black_box(encrypter.encrypt(&deflated, &payload).expect("encrypt")))
    });

    group.finish();
}

fn bench_allocation_profile(c: &mut Criterion) {
    let cors = build_cors();
    let mut group = c.benchmark_group("allocation_profile");
    group.sample_size(40);

    group.bench_function("preflight_allocations", |b| {
        let request = preflight_request();
        b.iter(|| {
            GLOBAL_ALLOCATOR.reset();
            let decision = cors.check(&request).expect("evaluation succeeds");
            assert!(matches!(decision, CorsDecision::Preflight(_)));
            let counts = GLOBAL_ALLOCATOR.snapshot();
            black_box((counts.bytes, counts.allocations));
        })
    });

    group.bench_function("generic_allocations", |b| {
        let request = same_origin_request();
        b.iter(|| {
            GLOBAL_ALLOCATOR.reset();
            let decision = cors.check(&request).expect("evaluation succeeds");
            assert!(matches!(decision, CorsDecision::Generic { .. }));
            let counts = GLOBAL_ALLOCATOR.snapshot();
            black_box((counts.bytes, counts.allocations));
        })
    });

    group.finish();
}

fn bench_picketlink(c: &mut Criterion) {
    bench_preflight_processing(c);
    bench_actual_processing(c);
    bench_origin_scaling(c);
    bench_configuration(c);
    bench_jwe(c);
    bench_allocation_profile(c);
}

fn configure_criterion() -> Criterion {
    if env::var_os("PICKETLINK_PROFILE_FLAMEGRAPH").is_some() {
        Criterion::default().with_profiler(PProfProfiler::new(1000, Output::Flamegraph(None)))
    } else {
        Criterion::default()
    }
}

criterion_group!(
    name = picketlink_rs_benches;
    config = configure_criterion();
    targets = bench_picketlink
);
criterion_main!(picketlink_rs_benches);
