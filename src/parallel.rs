use std::thread;
use std::sync::mpsc;
use std::sync::{ Arc, Mutex };

use log::{ debug, info, warn };

use crate::color::Color;
use crate::world::World;
use crate::camera::{ Camera, centered_range };
use crate::canvas::{ Canvas, PixelSink };
use crate::error::{ Error, Result };

pub enum Message {
    /// Render the canvas row at this centered `y`.
    Row(i64),
    Terminate,
}

/// A finished row: its centered `y`, and its clamped colors left to right.
type RowResult = (i64, Vec<Color>);

struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, world: Arc<World>, camera: Arc<Camera>, depth: i32,
        receiver: Arc<Mutex<mpsc::Receiver<Message>>>,
        results: mpsc::Sender<RowResult>) -> Worker {

        let thread = thread::spawn(move || loop {
            // Obtain the message being executed. A poisoned lock or a closed
            // channel both mean the pool is gone.
            let message = match receiver.lock() {
                Ok(rx) => rx.recv(),
                Err(_) => break,
            };

            match message {
                Ok(Message::Row(py)) => {
                    let row = camera.render_row(&world, py, depth);
                    if results.send((py, row)).is_err() {
                        break;
                    }
                },

                Ok(Message::Terminate) | Err(_) => {
                    // Exit the worker thread loop, terminating the thread.
                    break;
                }
            }
        });

        Worker { id, thread: Some(thread) }
    }
}

/// A fixed set of render threads sharing one job queue.
///
/// Workers only ever read the world and camera. Finished rows travel back
/// over a channel, so the thread that owns the output is the only one writing
/// pixels.
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: mpsc::Sender<Message>,
}

impl ThreadPool {
    pub fn new(size: usize, world: Arc<World>, camera: Arc<Camera>,
        depth: i32, results: mpsc::Sender<RowResult>) -> ThreadPool {
        // There should be at least one thread to run workers.
        let size = size.max(1);

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            workers.push(Worker::new(
                id,
                Arc::clone(&world),
                Arc::clone(&camera),
                depth,
                Arc::clone(&receiver),
                results.clone(),
            ));
        }

        debug!("Started {} render workers", size);
        ThreadPool { workers, sender }
    }

    pub fn execute(&self, message: Message) -> Result<()> {
        self.sender.send(message).map_err(|_| Error::PoolDisconnected)
    }

    /// Queues one `Terminate` per worker behind the jobs already queued.
    ///
    /// Workers drain the queue and then exit, dropping their result senders,
    /// so a worker lost to a panic shows up as a closed result channel
    /// instead of a hang.
    pub fn finish(&self) -> Result<()> {
        for _ in &self.workers {
            self.execute(Message::Terminate)?;
        }

        Ok(())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for _ in &self.workers {
            // Workers that already exited have dropped their receiver handle
            let _ = self.sender.send(Message::Terminate);
        }

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    warn!("Render worker {} panicked", worker.id);
                }
            }
        }

        debug!("Stopped {} render workers", self.workers.len());
    }
}

/// Renders a frame on `threads` worker threads into `sink`.
///
/// Produces the same pixels as `Camera::render_into`, each written exactly
/// once, though rows may arrive in any order. Fails if the workers stop
/// before every row has come back.
pub fn parallel_render_into<S: PixelSink>(world: Arc<World>,
    camera: Arc<Camera>, depth: i32, threads: usize, sink: &mut S)
    -> Result<()> {
    let rows = centered_range(camera.vsize);
    let expected = rows.end - rows.start;

    let (results_tx, results_rx) = mpsc::channel();
    let pool = ThreadPool::new(threads, world, Arc::clone(&camera), depth,
        results_tx);

    for py in rows {
        pool.execute(Message::Row(py))?;
    }
    pool.finish()?;

    for _ in 0..expected {
        let (py, row) = results_rx.recv().map_err(|_| Error::PoolDisconnected)?;

        for (px, color) in centered_range(camera.hsize).zip(row.into_iter()) {
            sink.put_pixel(px, py, color);
        }
    }

    Ok(())
}

/// Renders a frame into a fresh canvas using a pool of worker threads.
pub fn parallel_render(world: World, camera: Camera, depth: i32,
    threads: usize) -> Result<Canvas> {
    let mut canvas = Canvas::new(camera.hsize, camera.vsize);

    info!("Rendering {}x{} using {} threads...", camera.hsize, camera.vsize,
        threads);
    parallel_render_into(Arc::new(world), Arc::new(camera), depth, threads,
        &mut canvas)?;
    info!("...done.");

    Ok(canvas)
}

#[test]
fn parallel_matches_sequential() {
    let scene = crate::scene::Scene::reference();
    let mut camera = scene.camera.clone();
    camera.hsize = 24;
    camera.vsize = 17;

    let sequential = camera.render(&scene.world, scene.recursion_depth);
    let parallel = parallel_render(scene.world.clone(), camera,
        scene.recursion_depth, 3).unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_single_thread_and_zero_threads() {
    let scene = crate::scene::Scene::reference();
    let mut camera = scene.camera.clone();
    camera.hsize = 5;
    camera.vsize = 5;

    let expected = camera.render(&scene.world, 1);

    let one = parallel_render(scene.world.clone(), camera.clone(), 1, 1).unwrap();
    let zero = parallel_render(scene.world.clone(), camera, 1, 0).unwrap();

    assert_eq!(one, expected);
    assert_eq!(zero, expected);
}
