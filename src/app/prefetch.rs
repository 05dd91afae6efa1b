// src/app/prefetch.rs
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::cache::{download_and_store_resized_with_client, url_to_cache_key};
use super::gfx::Posters;
use super::types::{PosterState, PrefetchDone, WorkItem};

const RESIZE_MAX_W: u32 = 640;
const RESIZE_QUALITY: u8 = 80;
pub const MAX_DONE_PER_FRAME: usize = 12;

/// Background artwork downloader: a fixed worker pool fed over a channel.
pub struct PrefetchPool {
    work_tx: Option<Sender<WorkItem>>,
    done_rx: Receiver<PrefetchDone>,
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

impl PrefetchPool {
    /// Queue every URL not already cached and spin up `workers` threads.
    pub fn start(urls: &[String], posters: &mut Posters, workers: usize) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(workers)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(
                    ACCEPT,
                    HeaderValue::from_static("image/avif,image/webp,image/*;q=0.8,*/*;q=0.5"),
                );
                h
            })
            .build()
            .map_err(|e| format!("http client build failed: {e}"))?;
        let client = Arc::new(client);

        let (work_tx, work_rx) = mpsc::channel::<WorkItem>();
        let (done_tx, done_rx) = mpsc::channel::<PrefetchDone>();
        let work_rx = Arc::new(Mutex::new(work_rx));
        let dir: PathBuf = posters.dir().to_path_buf();

        for _ in 0..workers.max(1) {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);
            let dir = dir.clone();

            std::thread::spawn(move || loop {
                let job = {
                    let Ok(rx) = work_rx.lock() else { break };
                    rx.recv()
                };
                let Ok((url, key)) = job else { break };

                let result = download_and_store_resized_with_client(
                    &client,
                    &dir,
                    &url,
                    &key,
                    RESIZE_MAX_W,
                    RESIZE_QUALITY,
                );
                if done_tx.send(PrefetchDone { url, result }).is_err() {
                    break;
                }
            });
        }

        let mut total = 0usize;
        for url in urls {
            if posters.state(url) != PosterState::Pending {
                continue;
            }
            total += 1;
            let _ = work_tx.send((url.clone(), url_to_cache_key(url)));
        }
        info!("queued {total} artwork downloads on {} workers", workers.max(1));

        Ok(Self {
            work_tx: Some(work_tx),
            done_rx,
            total,
            completed: 0,
            failed: 0,
        })
    }

    pub fn is_done(&self) -> bool {
        self.completed + self.failed >= self.total
    }

    /// Drain finished downloads into `posters`. Returns how many arrived.
    pub fn poll(&mut self, posters: &mut Posters) -> usize {
        let mut drained = 0usize;
        while drained < MAX_DONE_PER_FRAME {
            match self.done_rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    match msg.result {
                        Ok(path) => {
                            posters.mark_cached(&msg.url, path);
                            self.completed += 1;
                        }
                        Err(e) => {
                            debug!("artwork failed: {e}");
                            posters.mark_failed(&msg.url);
                            self.failed += 1;
                        }
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    // every worker is gone; nothing else will arrive
                    let lost = self
                        .total
                        .saturating_sub(self.completed + self.failed);
                    if lost > 0 {
                        warn!("artwork workers exited with {lost} downloads outstanding");
                        self.failed += lost;
                    }
                    break;
                }
            }
        }

        if self.is_done() {
            // closing the queue lets idle workers exit
            let Some(tx) = self.work_tx.take() else {
                return drained;
            };
            drop(tx);
            if self.failed > 0 {
                warn!(
                    "artwork cache ready ({} cached, {} failed)",
                    self.completed, self.failed
                );
            } else {
                info!("artwork cache ready ({} cached)", self.completed);
            }
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_cached_artwork_is_not_queued() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://img.example/poster.jpg";
        std::fs::write(dir.path().join(format!("{}.jpg", url_to_cache_key(url))), b"x").unwrap();

        let mut posters = Posters::new(dir.path().to_path_buf());
        let mut pool = PrefetchPool::start(&[url.to_string()], &mut posters, 2).unwrap();
        assert_eq!(pool.total, 0);
        assert!(pool.is_done());
        assert_eq!(pool.poll(&mut posters), 0);
        assert!(pool.work_tx.is_none());
    }

    #[test]
    fn outstanding_jobs_fail_when_workers_are_gone() {
        let dir = tempfile::tempdir().unwrap();
        let mut posters = Posters::new(dir.path().to_path_buf());
        let (work_tx, _work_rx) = mpsc::channel::<WorkItem>();
        let (done_tx, done_rx) = mpsc::channel::<PrefetchDone>();
        done_tx
            .send(PrefetchDone {
                url: "https://img.example/a.jpg".into(),
                result: Err("404".into()),
            })
            .unwrap();
        drop(done_tx);

        let mut pool = PrefetchPool {
            work_tx: Some(work_tx),
            done_rx,
            total: 3,
            completed: 0,
            failed: 0,
        };
        assert_eq!(pool.poll(&mut posters), 1);
        assert_eq!(pool.failed, 3);
        assert!(pool.is_done());
        assert!(pool.work_tx.is_none());
    }
}
