#[cfg(not(feature = "integration"))]
#[test]
fn integration_tests_disabled() {
    // Enable with: cargo test --features integration
}

#[cfg(feature = "integration")]
mod integration {
    use std::time::Duration;

    use alloy::primitives::Address;
    use alloy_chains::Chain;
    use testcontainers_modules::anvil::{AnvilNode, ANVIL_PORT};
    use testcontainers_modules::testcontainers::runners::AsyncRunner;
    use url::Url;

    use voxel_toolbox::{EvmGateway, GatewayConfig, GatewayEvent, NetworkStatus, Toolbox};

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_CHAIN_ID: u64 = 31337;

    fn next_network_status(events: &crossbeam_channel::Receiver<GatewayEvent>) -> NetworkStatus {
        loop {
            match events
                .recv_timeout(Duration::from_secs(10))
                .expect("expected a network status from the gateway")
            {
                GatewayEvent::Network(status) => return status,
                _ => continue,
            }
        }
    }

    #[tokio::test]
    async fn network_watch_reports_chain_and_wallet() {
        let node = AnvilNode::default().start().await.unwrap();
        let port = node.get_host_port_ipv4(ANVIL_PORT).await.unwrap();
        let rpc_url = Url::parse(&format!("http://localhost:{port}")).unwrap();
        let signer: alloy::signers::local::PrivateKeySigner = ANVIL_KEY.parse().unwrap();
        let wallet = signer.address();

        let channel = EvmGateway::spawn(GatewayConfig {
            chain: Chain::from_id(ANVIL_CHAIN_ID),
            rpc_url,
            contract: Address::ZERO,
            signer: Some(signer),
            start_block: 0,
        });

        let status = next_network_status(&channel.events);
        assert_eq!(status.chain_id, Some(ANVIL_CHAIN_ID));
        assert_eq!(status.wallet, Some(wallet));

        let mut on_anvil = Toolbox::new(256, Chain::from_id(ANVIL_CHAIN_ID));
        assert!(on_anvil.check_network(&status).is_ok());

        let mut on_mainnet = Toolbox::new(256, Chain::mainnet());
        assert!(on_mainnet.check_network(&status).is_err());
        assert_eq!(
            on_mainnet.status.error_msg,
            "Error. You are not on the mainnet."
        );
    }
}
