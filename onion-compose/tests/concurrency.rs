//! One composed chain shared across tasks on a multi-threaded runtime.

use onion_compose::*;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Ctx {
    id: usize,
    seen: Vec<(usize, &'static str)>,
}

type Mw = Arc<dyn Middleware<Ctx, usize, String>>;

fn tagged(stage: &'static str, delay_ms: u64) -> Mw {
    Arc::new(middleware_fn::<Ctx, usize, String, _>(move |ctx, next| {
        Box::pin(async move {
            ctx.seen.push((ctx.id, stage));
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            next.run(ctx).await
        })
    }))
}

fn echo_id() -> Mw {
    Arc::new(sync_middleware_fn::<Ctx, usize, String, _>(|ctx, _next| {
        Outcome::ok(ctx.id)
    }))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn spawned_executions_do_not_interfere() {
    let composed = compose(vec![tagged("auth", 3), tagged("log", 1), echo_id()]);

    let handles: Vec<_> = (0..32)
        .map(|id| {
            let composed = composed.clone();
            tokio::spawn(async move {
                let mut ctx = Ctx {
                    id,
                    ..Ctx::default()
                };
                let value = composed.execute(&mut ctx).await;
                (ctx, value)
            })
        })
        .collect();

    for handle in handles {
        let (ctx, value) = handle.await.unwrap();
        assert_eq!(value.unwrap(), ctx.id);
        assert_eq!(ctx.seen, vec![(ctx.id, "auth"), (ctx.id, "log")]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn double_invocation_in_one_execution_leaves_others_intact() {
    let faulty: Mw = Arc::new(middleware_fn::<Ctx, usize, String, _>(|ctx, next| {
        Box::pin(async move {
            if ctx.id == 0 {
                let _ = next.run(ctx).await;
            }
            next.run(ctx).await
        })
    }));
    let composed = compose(vec![faulty, tagged("inner", 2), echo_id()]);

    let bad = {
        let composed = composed.clone();
        tokio::spawn(async move {
            let mut ctx = Ctx::default();
            composed.execute(&mut ctx).await
        })
    };
    let good = tokio::spawn(async move {
        let mut ctx = Ctx {
            id: 7,
            ..Ctx::default()
        };
        composed.execute(&mut ctx).await
    });

    assert!(bad.await.unwrap().unwrap_err().is_double_invocation());
    assert_eq!(good.await.unwrap().unwrap(), 7);
}
