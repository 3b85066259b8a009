/// Evaluate an expression, logging its wall time at `debug` level.
#[macro_export]
macro_rules! profile(
  ($title: literal, $expr: expr) => {{
    let t0 = std::time::Instant::now();
    let ret = $expr;
    ::log::debug!("{} profile: {}ms", $title, t0.elapsed().as_millis());
    ret
  }}
);
