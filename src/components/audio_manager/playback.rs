// Bounded wait on a play request.
use std::future::Future;

use futures_util::future::{select, Either};
use futures_util::pin_mut;

use super::error::MediaError;
use super::session::PlayOutcome;

/// Race a play request against `timeout`. The losing future is dropped, not
/// cancelled: the element may still start later, and its `play` event is what
/// resynchronizes the session in that case.
pub async fn race_playback<P, T>(play: P, timeout: T) -> PlayOutcome
where
    P: Future<Output = Result<(), MediaError>>,
    T: Future<Output = ()>,
{
    pin_mut!(play);
    pin_mut!(timeout);
    match select(play, timeout).await {
        Either::Left((Ok(()), _)) => PlayOutcome::Started,
        Either::Left((Err(reason), _)) => PlayOutcome::Rejected(reason),
        Either::Right(((), _)) => PlayOutcome::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timeout() -> impl Future<Output = ()> {
        tokio::time::sleep(Duration::from_millis(5_000))
    }

    #[tokio::test(start_paused = true)]
    async fn resolved_play_wins_the_race() {
        let outcome = race_playback(async { Ok(()) }, timeout()).await;
        assert_eq!(outcome, PlayOutcome::Started);
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_is_passed_through() {
        let outcome = race_playback(
            async { Err(MediaError::PlaybackInterrupted) },
            timeout(),
        )
        .await;
        assert_eq!(outcome, PlayOutcome::Rejected(MediaError::PlaybackInterrupted));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_play_times_out_after_five_seconds() {
        let started = tokio::time::Instant::now();
        let outcome = race_playback(
            futures_util::future::pending::<Result<(), MediaError>>(),
            timeout(),
        )
        .await;
        assert_eq!(outcome, PlayOutcome::TimedOut);
        assert_eq!(started.elapsed(), Duration::from_millis(5_000));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_play_under_the_limit_still_starts() {
        let play = async {
            tokio::time::sleep(Duration::from_millis(4_999)).await;
            Ok(())
        };
        assert_eq!(race_playback(play, timeout()).await, PlayOutcome::Started);
    }
}
