use chrono::{Duration, TimeZone, Utc};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Exponential moving average with the usual 2/(n+1) multiplier, seeded
/// with the first value.
fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values.first().copied().unwrap_or(0.0);
    for &v in values {
        current = (v - current) * multiplier + current;
        out.push(current);
    }
    out
}

/// Wilder RSI; 50 until the first window is full.
fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![50.0; values.len()];
    if values.len() <= period {
        return out;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        avg_gain += change.max(0.0);
        avg_loss += (-change).max(0.0);
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in period..values.len() {
        if i > period {
            let change = values[i] - values[i - 1];
            avg_gain = (avg_gain * (period as f64 - 1.0) + change.max(0.0)) / period as f64;
            avg_loss = (avg_loss * (period as f64 - 1.0) + (-change).max(0.0)) / period as f64;
        }
        out[i] = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }
    out
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = 200;
    let candle = Duration::minutes(5);
    let first = Utc.with_ymd_and_hms(2017, 6, 10, 0, 0, 0).unwrap();

    // Random-walk closes with per-candle ranges.
    let mut closes = Vec::with_capacity(rows);
    let mut price = 2500.0;
    for _ in 0..rows {
        price = (price + rng.gauss(0.0, 4.0)).max(1.0);
        closes.push(price);
    }

    let ema_short = ema(&closes, 10);
    let ema_long = ema(&closes, 21);
    // DEMA column: difference of the short and long EMA.
    let dema: Vec<f64> = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(s, l)| s - l)
        .collect();
    let rsi_values = rsi(&closes, 14);

    let output_path = "results.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "start_time",
            "end_time",
            "low",
            "high",
            "open",
            "close",
            "volume",
            "bought_size",
            "sold_size",
            "budget",
            "invested",
            "dema-10-21",
            "ema-10",
            "ema-21",
            "rsi-14",
        ])
        .expect("Failed to write header");

    let mut budget = 1000.0;
    let mut invested = 0.0;
    let mut holding = false;
    let mut trades = 0;

    for i in 0..rows {
        let close = closes[i];
        let open = if i == 0 { close } else { closes[i - 1] };
        let spread = rng.next_f64() * 3.0;
        let low = close.min(open) - spread;
        let high = close.max(open) + spread;
        let volume = 20.0 + rng.next_f64() * 80.0;

        // Trade on DEMA sign flips: buy when the short EMA crosses above
        // the long one, sell on the way back down. Blank cells elsewhere.
        let mut bought = String::new();
        let mut sold = String::new();
        if i > 0 && !holding && dema[i - 1] <= 0.0 && dema[i] > 0.0 {
            let size = budget / close;
            bought = format!("{size:.6}");
            invested = size;
            budget = 0.0;
            holding = true;
            trades += 1;
        } else if i > 0 && holding && dema[i - 1] >= 0.0 && dema[i] < 0.0 {
            sold = format!("{invested:.6}");
            budget = invested * close;
            invested = 0.0;
            holding = false;
            trades += 1;
        }

        let start = first + candle * i as i32;
        writer
            .write_record([
                start.to_rfc3339(),
                (start + candle).to_rfc3339(),
                format!("{low:.6}"),
                format!("{high:.6}"),
                format!("{open:.6}"),
                format!("{close:.6}"),
                format!("{volume:.6}"),
                bought,
                sold,
                format!("{budget:.6}"),
                format!("{invested:.6}"),
                format!("{:.6}", dema[i]),
                format!("{:.6}", ema_short[i]),
                format!("{:.6}", ema_long[i]),
                format!("{:.6}", rsi_values[i]),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush csv writer");

    println!("Wrote {rows} candles ({trades} trades) to {output_path}");
}
