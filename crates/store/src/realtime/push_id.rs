//! Chronologically sortable 20-character child ids.
//!
//! Eight characters encode the creation time in milliseconds, twelve are
//! random. Ids generated within the same millisecond increment the random
//! part so they still sort in creation order.

use std::sync::Mutex;

use rand::Rng;

const ALPHABET: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Length of every generated id.
pub const PUSH_ID_LEN: usize = 20;

#[derive(Default)]
struct State {
    last_millis: i64,
    last_random: [u8; 12],
}

/// Generates push ids. One generator per store keeps ids monotonic.
#[derive(Default)]
pub struct PushIdGenerator {
    state: Mutex<State>,
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for the current wall-clock time.
    pub fn next_id(&self) -> String {
        self.generate(chrono::Utc::now().timestamp_millis())
    }

    /// Next id for `millis`.
    pub fn generate(&self, millis: i64) -> String {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if millis == state.last_millis {
            increment(&mut state.last_random);
        } else {
            let mut rng = rand::rng();
            for digit in state.last_random.iter_mut() {
                *digit = rng.random_range(0..64);
            }
            state.last_millis = millis;
        }

        let mut id = String::with_capacity(PUSH_ID_LEN);
        let mut time = millis.max(0);
        let mut time_chars = [0u8; 8];
        for slot in time_chars.iter_mut().rev() {
            *slot = ALPHABET[(time % 64) as usize];
            time /= 64;
        }
        id.extend(time_chars.iter().map(|&b| b as char));
        id.extend(state.last_random.iter().map(|&d| ALPHABET[d as usize] as char));
        id
    }
}

/// Add one to a base-64 digit string, carrying leftwards.
fn increment(digits: &mut [u8; 12]) {
    for digit in digits.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
}
