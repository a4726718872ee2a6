mod test_resource_properties;
