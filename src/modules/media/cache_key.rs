use super::{MediaKind, MediaSource};

/// Compute the composite cache key for a (source, kind, native id) triple.
///
/// The key is `"<tag>:<id>"` where the tag encodes the source, and the kind
/// too whenever a source emits more than one kind: TMDB movie "42" and TMDB
/// TV show "42" are unrelated entities and must never share a key. Keys are
/// pure functions of their inputs with no time or randomness component, so
/// they stay stable across restarts. Changing this scheme orphans every
/// record already on disk.
pub fn cache_key(source: MediaSource, kind: MediaKind, native_id: &str) -> String {
    format!("{}:{}", source_tag(source, kind), native_id)
}

/// Storage tag for a (source, kind) pair. The well-known pairs keep the
/// short tags the cache file has always used; every other combination gets a
/// composed tag so the function stays total and collision-free.
fn source_tag(source: MediaSource, kind: MediaKind) -> String {
    match (source, kind) {
        (MediaSource::Mal, MediaKind::Anime) => "anime".to_string(),
        (MediaSource::Tmdb, MediaKind::Movie) => "movie".to_string(),
        (MediaSource::Tmdb, MediaKind::TvShow) => "tv".to_string(),
        (source, kind) => format!("{}-{}", source.as_str(), kind.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SOURCES: [MediaSource; 3] =
        [MediaSource::Mal, MediaSource::Tmdb, MediaSource::Local];
    const ALL_KINDS: [MediaKind; 3] = [MediaKind::Anime, MediaKind::Movie, MediaKind::TvShow];

    #[test]
    fn key_is_deterministic() {
        for source in ALL_SOURCES {
            for kind in ALL_KINDS {
                assert_eq!(
                    cache_key(source, kind, "123"),
                    cache_key(source, kind, "123")
                );
            }
        }
    }

    #[test]
    fn distinct_triples_yield_distinct_keys() {
        let mut seen = std::collections::HashSet::new();
        for source in ALL_SOURCES {
            for kind in ALL_KINDS {
                for id in ["1", "42", "anime"] {
                    assert!(
                        seen.insert(cache_key(source, kind, id)),
                        "collision for ({:?}, {:?}, {})",
                        source,
                        kind,
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn tmdb_movie_and_tv_never_collide() {
        assert_ne!(
            cache_key(MediaSource::Tmdb, MediaKind::Movie, "42"),
            cache_key(MediaSource::Tmdb, MediaKind::TvShow, "42")
        );
    }

    #[test]
    fn well_known_tags_are_stable() {
        assert_eq!(cache_key(MediaSource::Mal, MediaKind::Anime, "5"), "anime:5");
        assert_eq!(
            cache_key(MediaSource::Tmdb, MediaKind::Movie, "550"),
            "movie:550"
        );
        assert_eq!(
            cache_key(MediaSource::Tmdb, MediaKind::TvShow, "1399"),
            "tv:1399"
        );
    }
}
