mod common;

use common::*;
use reels_config::{RuntimeConfig, WarmFrameAnchor};
use reels_core::sim::{Journal, PlayPolicy, SimVideo};
use reels_core::{
    CardIndex, CarouselEvent, ClickTarget, HostEvent, IntersectionEntry,
    MotionState, Playback, PlaybackOutcome, VideoEvent, VideoMode,
};

#[test]
fn videos_are_parked_on_a_warm_frame() {
    let h = Harness::new();
    for i in 0..CARDS {
        let video = h.video(i);
        assert!(video.paused);
        assert!(video.muted);
        assert!(video.looping);
        assert!(video.plays_inline);
        assert!(!video.controls);
        assert!(approx(video.current_time, CLIP_SECONDS - 0.05));
        assert!(!h.has_playing_class(i));
    }
}

#[test]
fn start_anchor_reproduces_early_warm_frame() {
    let config = RuntimeConfig {
        warm_frame_anchor: Some(WarmFrameAnchor::Start),
        ..RuntimeConfig::default()
    };
    let h = Harness::with_config(config);
    assert!(approx(h.video(0).current_time, 0.05));
}

#[test]
fn warm_frame_waits_for_loaded_data() {
    let journal = Journal::new();
    let mut videos = loaded_videos(&journal, CARDS);
    videos[2] = Some(SimVideo::unloaded(CardIndex(2), &journal));
    let mut h = Harness::from_parts(
        six_card_surface(&journal),
        videos,
        RuntimeConfig::default(),
        journal,
    );
    let loaded = HostEvent::VideoLoadedData(CardIndex(2));
    assert!(h.reels.surface().active_subscriptions().contains(&loaded));
    assert_eq!(h.video(2).current_time, 0.0);

    h.video_mut(2).load(8.0);
    h.video_event(2, VideoEvent::LoadedData);
    assert!(approx(h.video(2).current_time, 7.95));
    assert!(!h.reels.surface().active_subscriptions().contains(&loaded));

    // Later loads do not seek again.
    h.video_mut(2).current_time = 3.0;
    h.video_event(2, VideoEvent::LoadedData);
    assert_eq!(h.video(2).current_time, 3.0);
}

#[test]
fn click_plays_with_sound_and_centers_the_card() {
    let mut h = Harness::new();
    h.frames(3);
    let playback = h.click(3);
    assert_eq!(
        playback,
        Some(Playback {
            card: CardIndex(3),
            outcome: PlaybackOutcome::Playing { muted: false },
        })
    );
    let video = h.video(3);
    assert!(!video.paused);
    assert!(!video.muted);
    assert!(!video.looping);
    assert_eq!(video.volume, 1.0);
    assert!(h.has_playing_class(3));
    assert!(!h.reels.is_marquee_running());

    h.settle();
    let viewport = h.reels.surface().viewport();
    assert!(approx(h.card_center(3), viewport.center_x()));
    assert_eq!(h.reels.motion_state(), &MotionState::Idle);
    h.assert_in_band();
}

#[test]
fn switching_cards_pauses_the_previous_video_first() {
    let mut h = Harness::new();
    h.click(0);
    h.settle();
    h.journal.clear();

    h.click(3);
    let pause = h.journal.position("video0 pause").expect("video0 paused");
    let unmark = h
        .journal
        .position("card#0 -is-playing")
        .expect("class removed");
    let play = h.journal.position("video3 play").expect("video3 played");
    assert!(pause < play && unmark < play, "{:?}", h.journal.entries());

    let previous = h.video(0);
    assert!(previous.paused && previous.muted && previous.looping);
    assert!(!h.has_playing_class(0));
    assert!(h.has_playing_class(3));
    assert_eq!(h.reels.activated_cards(), vec![CardIndex(3)]);
    assert_eq!(h.reels.video_mode(CardIndex(0)), Some(VideoMode::Idle));
}

#[test]
fn clicking_the_playing_card_returns_it_to_idle() {
    let mut h = Harness::new();
    h.click(1);
    h.settle();
    let playback = h.click(1);
    assert_eq!(
        playback.map(|p| p.outcome),
        Some(PlaybackOutcome::Paused)
    );
    let video = h.video(1);
    assert!(video.paused && video.muted && video.looping);
    assert!(!h.has_playing_class(1));
    assert!(h.reels.is_marquee_running());
    assert!(h.reels.activated_cards().is_empty());
}

#[test]
fn clicks_outside_videos_do_nothing() {
    let mut h = Harness::new();
    let out = h.reels.update(CarouselEvent::Click(ClickTarget::Other));
    assert_eq!(out, None);
    assert_eq!(h.click(42), None);
    assert!(h.reels.is_marquee_running());
}

#[test]
fn cards_without_videos_are_skipped() {
    let journal = Journal::new();
    let mut videos = loaded_videos(&journal, 3);
    videos[1] = None;
    let mut h = Harness::from_parts(
        six_card_surface(&journal),
        videos,
        RuntimeConfig::default(),
        journal,
    );
    assert_eq!(h.reels.card_count(), CARDS);
    assert!(h.reels.video(CardIndex(1)).is_none());
    assert!(h.reels.video(CardIndex(4)).is_none());
    assert_eq!(h.click(1), None);
    assert_eq!(h.click(4), None);
    h.video_event(4, VideoEvent::Play);
    assert!(h.reels.is_marquee_running());
}

#[test]
fn rejected_unmuted_play_retries_muted() {
    let journal = Journal::new();
    let mut videos = loaded_videos(&journal, CARDS);
    videos[2] = Some(
        SimVideo::new(CardIndex(2), &journal, CLIP_SECONDS)
            .with_policy(PlayPolicy::RejectUnmuted),
    );
    let mut h = Harness::from_parts(
        six_card_surface(&journal),
        videos,
        RuntimeConfig::default(),
        journal,
    );
    let playback = h.click(2).expect("card has a video");
    assert_eq!(playback.outcome, PlaybackOutcome::Playing { muted: true });
    assert!(h.journal.contains("video2 play rejected"));
    assert!(!h.video(2).paused);
    assert!(h.video(2).muted);
    assert_eq!(h.reels.activated_cards(), vec![CardIndex(2)]);
}

#[test]
fn blocked_playback_reports_and_resumes_after_centering() {
    let journal = Journal::new();
    let mut videos = loaded_videos(&journal, CARDS);
    videos[5] = Some(
        SimVideo::new(CardIndex(5), &journal, CLIP_SECONDS)
            .with_policy(PlayPolicy::RejectAll),
    );
    let mut h = Harness::from_parts(
        six_card_surface(&journal),
        videos,
        RuntimeConfig::default(),
        journal,
    );
    let playback = h.click(5).expect("card has a video");
    assert_eq!(playback.outcome, PlaybackOutcome::Blocked);
    let video = h.video(5);
    assert!(video.paused && video.muted && video.looping);
    assert!(!h.has_playing_class(5));
    assert!(h.reels.activated_cards().is_empty());

    // The centering tween still runs, then the marquee takes over.
    assert!(matches!(h.reels.motion_state(), MotionState::Tween(_)));
    h.settle();
    assert!(h.reels.is_marquee_running());
}

#[test]
fn ended_video_returns_to_idle_and_resumes_marquee() {
    let mut h = Harness::new();
    h.click(4);
    h.settle();
    h.video_mut(4).finish();
    h.video_event(4, VideoEvent::Ended);
    let video = h.video(4);
    assert!(video.paused && video.muted && video.looping);
    assert!(!h.has_playing_class(4));
    assert!(h.reels.is_marquee_running());
}

#[test]
fn native_play_is_exclusive_and_centers() {
    let mut h = Harness::new();
    h.click(0);
    h.settle();

    h.video_mut(2).start_externally();
    h.video_event(2, VideoEvent::Play);
    assert!(h.video(0).paused);
    assert!(!h.has_playing_class(0));
    assert!(h.has_playing_class(2));
    match h.reels.motion_state() {
        MotionState::Tween(tween) => assert_eq!(tween.card(), Some(CardIndex(2))),
        other => panic!("expected centering tween, got {other:?}"),
    }
}

#[test]
fn play_event_for_a_card_already_centering_keeps_the_tween() {
    let mut h = Harness::new();
    h.click(3);
    h.frames(5);
    let before = h.reels.motion_state().clone();
    h.video_event(3, VideoEvent::Play);
    assert_eq!(h.reels.motion_state(), &before);
}

#[test]
fn pause_event_resumes_only_when_nothing_plays() {
    let mut h = Harness::new();
    h.click(1);
    h.settle();
    h.video_mut(1).paused = true;
    h.video_event(1, VideoEvent::Pause);
    assert!(h.reels.is_marquee_running());
    assert!(h.video(1).muted);
    assert_eq!(h.reels.video_mode(CardIndex(1)), Some(VideoMode::Idle));
}

#[test]
fn stale_pause_event_leaves_restarted_playback_alone() {
    let mut h = Harness::new();
    h.click(1);
    h.settle();
    // The video is still playing when the pause notification arrives.
    h.video_event(1, VideoEvent::Pause);
    h.video_event(1, VideoEvent::Ended);
    let video = h.video(1);
    assert!(!video.paused);
    assert!(!video.muted && !video.looping);
    assert!(h.has_playing_class(1));
    assert_eq!(h.reels.activated_cards(), vec![CardIndex(1)]);
    assert!(!h.reels.is_marquee_running());
}

#[test]
fn leaving_the_viewport_pauses_the_card() {
    let mut h = Harness::new();
    h.click(2);
    h.settle();
    h.reels
        .update(CarouselEvent::Intersection(vec![IntersectionEntry::visible(
            CardIndex(2),
            0.4,
        )]));
    assert!(!h.video(2).paused);

    h.reels
        .update(CarouselEvent::Intersection(vec![
            IntersectionEntry::visible(CardIndex(3), 1.0),
            IntersectionEntry::hidden(CardIndex(2)),
        ]));
    let video = h.video(2);
    assert!(video.paused && video.muted);
    assert!(!h.has_playing_class(2));
    assert!(h.reels.is_marquee_running());
}

#[test]
fn at_most_one_card_is_ever_activated() {
    let mut h = Harness::new();
    let script = [0, 3, 3, 5, 1, 1, 2, 0, 4, 4, 4, 5];
    for (step, card) in script.into_iter().enumerate() {
        h.click(card);
        assert!(h.reels.activated_cards().len() <= 1);
        h.frames(step % 4 * 10);
        if step % 3 == 0 {
            let other = (card + 1) % CARDS;
            h.video_mut(other).start_externally();
            h.video_event(other, VideoEvent::Play);
            let playing = (0..CARDS).filter(|&i| !h.video(i).paused).count();
            assert_eq!(playing, 1);
        }
        assert!(h.reels.activated_cards().len() <= 1);
        h.assert_in_band();
    }
}
