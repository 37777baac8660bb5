use text_queue::data_structures::bounded_copy;
use text_queue::tracking::Tracking;
use text_queue::Queue;

// cargo run --example walkthrough
fn main() {
    let tracking = Tracking::new();
    let mut queue = Queue::new_in(&tracking);
    queue.insert_back("a").unwrap();
    queue.insert_back("b").unwrap();
    queue.insert_front("c").unwrap();
    println!("queue: {:?}, size: {}", queue, queue.size());

    queue.reverse();
    println!("reversed: {:?}", queue);

    let mut buf = [0u8; 10];
    queue.remove_front(Some(&mut buf[..])).unwrap();
    println!(
        "removed: {:?}, left: {:?}",
        String::from_utf8_lossy(bounded_copy::terminated(&buf)),
        queue
    );

    tracking.fail_on(1);
    let refused = queue.insert_back("never stored");
    println!("refused insert: {:?}, queue still {:?}", refused, queue);
    println!("allocator: {:?}", tracking.stats());

    queue.destroy();
    println!("after destroy: {:?}", tracking.stats());
}
