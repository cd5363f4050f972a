use crate::record::ScoreRecord;
use futures::{stream, StreamExt};
use log::{info, warn};
use verdant_imagery::{
    headings, Coordinate, FetchError, FetchOptions, ImageFetcher, ImageSample, ImageryProvider,
};
use verdant_segment::{Coverage, FailureCause, SegmentInference, SegmentationScorer, SemanticLabel};

/// How many coordinates are fetched in flight at once. Fetches are
/// independent network calls; the buffered stream re-sequences results
/// into input order.
const FETCH_CONCURRENCY: usize = 8;

/// Composes fetching and scoring over a batch of coordinates. Fetches run
/// concurrently; scoring runs sequentially because the session owns the
/// model exclusively.
pub struct Pipeline<P, S> {
    fetcher: ImageFetcher<P>,
    scorer: SegmentationScorer<S>,
}

impl<P: ImageryProvider, S: SegmentInference> Pipeline<P, S> {
    pub fn new(provider: P, session: S) -> Self {
        Pipeline {
            fetcher: ImageFetcher::new(provider),
            scorer: SegmentationScorer::new(session),
        }
    }

    pub fn with_options(provider: P, session: S, options: FetchOptions) -> Self {
        Pipeline {
            fetcher: ImageFetcher::with_options(provider, options),
            scorer: SegmentationScorer::new(session),
        }
    }

    /// Scores every (coordinate, heading) pair for `label`.
    ///
    /// A fatal fetch for one coordinate yields `Unavailable` records
    /// carrying the cause and the batch continues. The only way the whole
    /// run fails is a denied API key, which would fail every lookup alike.
    pub async fn run(
        &mut self,
        coordinates: &[Coordinate],
        api_key: &str,
        multi_heading: bool,
        label: SemanticLabel,
    ) -> Result<Vec<ScoreRecord>, FetchError> {
        let fetched = {
            let fetcher = &self.fetcher;
            stream::iter(coordinates.iter().copied())
                .map(|coordinate| async move {
                    (coordinate, fetcher.fetch(coordinate, api_key, multi_heading).await)
                })
                .buffered(FETCH_CONCURRENCY)
                .collect::<Vec<_>>()
                .await
        };

        let mut records = Vec::with_capacity(coordinates.len() * headings(multi_heading).len());
        for (coordinate, outcome) in fetched {
            match outcome {
                Ok(samples) => self.score_coordinate(coordinate, samples, label, &mut records),
                Err(err @ FetchError::Denied(_)) => return Err(err),
                Err(err) => {
                    warn!("fetch failed at {coordinate}: {err}");
                    let cause = FailureCause::Fetch(err.to_string());
                    for &heading in headings(multi_heading) {
                        records.push(ScoreRecord {
                            coordinate,
                            heading,
                            metadata: None,
                            coverage: Coverage::Unavailable(cause.clone()),
                        });
                    }
                }
            }
        }

        info!(
            "scored {} record(s) over {} coordinate(s)",
            records.len(),
            coordinates.len()
        );
        Ok(records)
    }

    fn score_coordinate(
        &mut self,
        coordinate: Coordinate,
        samples: Vec<ImageSample>,
        label: SemanticLabel,
        records: &mut Vec<ScoreRecord>,
    ) {
        let coverages = self
            .scorer
            .score(samples.iter().map(|sample| sample.image.as_ref()), label);

        for (sample, coverage) in samples.into_iter().zip(coverages) {
            records.push(ScoreRecord {
                coordinate,
                heading: sample.heading,
                metadata: Some(sample.metadata),
                coverage,
            });
        }
    }
}
